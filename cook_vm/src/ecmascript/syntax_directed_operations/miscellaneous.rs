// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use oxc_ast::{
    AstKind,
    ast::{Expression, Statement},
};

/// The ESTree `type` of a statement, as shown in diagnostics.
pub(crate) fn statement_type_name(statement: &Statement) -> &'static str {
    match statement {
        Statement::BlockStatement(_) => "BlockStatement",
        Statement::BreakStatement(_) => "BreakStatement",
        Statement::ContinueStatement(_) => "ContinueStatement",
        Statement::DebuggerStatement(_) => "DebuggerStatement",
        Statement::DoWhileStatement(_) => "DoWhileStatement",
        Statement::EmptyStatement(_) => "EmptyStatement",
        Statement::ExpressionStatement(_) => "ExpressionStatement",
        Statement::ForInStatement(_) => "ForInStatement",
        Statement::ForOfStatement(_) => "ForOfStatement",
        Statement::ForStatement(_) => "ForStatement",
        Statement::IfStatement(_) => "IfStatement",
        Statement::LabeledStatement(_) => "LabeledStatement",
        Statement::ReturnStatement(_) => "ReturnStatement",
        Statement::SwitchStatement(_) => "SwitchStatement",
        Statement::ThrowStatement(_) => "ThrowStatement",
        Statement::TryStatement(_) => "TryStatement",
        Statement::WhileStatement(_) => "WhileStatement",
        Statement::WithStatement(_) => "WithStatement",
        Statement::VariableDeclaration(_) => "VariableDeclaration",
        Statement::FunctionDeclaration(_) => "FunctionDeclaration",
        Statement::ClassDeclaration(_) => "ClassDeclaration",
        Statement::TSTypeAliasDeclaration(_) => "TSTypeAliasDeclaration",
        Statement::TSInterfaceDeclaration(_) => "TSInterfaceDeclaration",
        Statement::TSEnumDeclaration(_) => "TSEnumDeclaration",
        Statement::TSModuleDeclaration(_) => "TSModuleDeclaration",
        Statement::TSGlobalDeclaration(_) => "TSModuleDeclaration",
        Statement::TSImportEqualsDeclaration(_) => "TSImportEqualsDeclaration",
        Statement::ImportDeclaration(_) => "ImportDeclaration",
        Statement::ExportAllDeclaration(_) => "ExportAllDeclaration",
        Statement::ExportDefaultDeclaration(_) => "ExportDefaultDeclaration",
        Statement::ExportNamedDeclaration(_) => "ExportNamedDeclaration",
        Statement::TSExportAssignment(_) => "TSExportAssignment",
        Statement::TSNamespaceExportDeclaration(_) => "TSNamespaceExportDeclaration",
    }
}

/// The ESTree `type` of an expression, as shown in diagnostics.
pub(crate) fn expression_type_name(expression: &Expression) -> &'static str {
    match expression {
        Expression::BooleanLiteral(_)
        | Expression::NullLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::StringLiteral(_) => "Literal",
        Expression::BigIntLiteral(_) => "BigIntLiteral",
        Expression::RegExpLiteral(_) => "RegExpLiteral",
        Expression::TemplateLiteral(_) => "TemplateLiteral",
        Expression::Identifier(_) => "Identifier",
        Expression::MetaProperty(_) => "MetaProperty",
        Expression::Super(_) => "Super",
        Expression::ArrayExpression(_) => "ArrayExpression",
        Expression::ArrowFunctionExpression(_) => "ArrowFunctionExpression",
        Expression::AssignmentExpression(_) => "AssignmentExpression",
        Expression::AwaitExpression(_) => "AwaitExpression",
        Expression::BinaryExpression(_) => "BinaryExpression",
        Expression::CallExpression(_) => "CallExpression",
        Expression::ChainExpression(_) => "ChainExpression",
        Expression::ClassExpression(_) => "ClassExpression",
        Expression::ComputedMemberExpression(_)
        | Expression::StaticMemberExpression(_)
        | Expression::PrivateFieldExpression(_) => "MemberExpression",
        Expression::ConditionalExpression(_) => "ConditionalExpression",
        Expression::FunctionExpression(_) => "FunctionExpression",
        Expression::ImportExpression(_) => "ImportExpression",
        Expression::LogicalExpression(_) => "LogicalExpression",
        Expression::NewExpression(_) => "NewExpression",
        Expression::ObjectExpression(_) => "ObjectExpression",
        Expression::ParenthesizedExpression(_) => "ParenthesizedExpression",
        Expression::SequenceExpression(_) => "SequenceExpression",
        Expression::TaggedTemplateExpression(_) => "TaggedTemplateExpression",
        Expression::ThisExpression(_) => "ThisExpression",
        Expression::UnaryExpression(_) => "UnaryExpression",
        Expression::UpdateExpression(_) => "UpdateExpression",
        Expression::YieldExpression(_) => "YieldExpression",
        Expression::PrivateInExpression(_) => "PrivateInExpression",
        Expression::JSXElement(_) => "JSXElement",
        Expression::JSXFragment(_) => "JSXFragment",
        Expression::TSAsExpression(_) => "TSAsExpression",
        Expression::TSSatisfiesExpression(_) => "TSSatisfiesExpression",
        Expression::TSTypeAssertion(_) => "TSTypeAssertion",
        Expression::TSNonNullExpression(_) => "TSNonNullExpression",
        Expression::TSInstantiationExpression(_) => "TSInstantiationExpression",
        Expression::V8IntrinsicExpression(_) => "V8IntrinsicExpression",
    }
}

/// The [`AstKind`] of a statement, handed to hooks before it is evaluated.
pub(crate) fn statement_kind<'a>(statement: &'a Statement<'a>) -> AstKind<'a> {
    match statement {
        Statement::BlockStatement(it) => AstKind::BlockStatement(it),
        Statement::BreakStatement(it) => AstKind::BreakStatement(it),
        Statement::ContinueStatement(it) => AstKind::ContinueStatement(it),
        Statement::DebuggerStatement(it) => AstKind::DebuggerStatement(it),
        Statement::DoWhileStatement(it) => AstKind::DoWhileStatement(it),
        Statement::EmptyStatement(it) => AstKind::EmptyStatement(it),
        Statement::ExpressionStatement(it) => AstKind::ExpressionStatement(it),
        Statement::ForInStatement(it) => AstKind::ForInStatement(it),
        Statement::ForOfStatement(it) => AstKind::ForOfStatement(it),
        Statement::ForStatement(it) => AstKind::ForStatement(it),
        Statement::IfStatement(it) => AstKind::IfStatement(it),
        Statement::LabeledStatement(it) => AstKind::LabeledStatement(it),
        Statement::ReturnStatement(it) => AstKind::ReturnStatement(it),
        Statement::SwitchStatement(it) => AstKind::SwitchStatement(it),
        Statement::ThrowStatement(it) => AstKind::ThrowStatement(it),
        Statement::TryStatement(it) => AstKind::TryStatement(it),
        Statement::WhileStatement(it) => AstKind::WhileStatement(it),
        Statement::WithStatement(it) => AstKind::WithStatement(it),
        Statement::VariableDeclaration(it) => AstKind::VariableDeclaration(it),
        Statement::FunctionDeclaration(it) => AstKind::Function(it),
        Statement::ClassDeclaration(it) => AstKind::Class(it),
        Statement::TSTypeAliasDeclaration(it) => AstKind::TSTypeAliasDeclaration(it),
        Statement::TSInterfaceDeclaration(it) => AstKind::TSInterfaceDeclaration(it),
        Statement::TSEnumDeclaration(it) => AstKind::TSEnumDeclaration(it),
        Statement::TSModuleDeclaration(it) => AstKind::TSModuleDeclaration(it),
        Statement::TSGlobalDeclaration(it) => AstKind::TSGlobalDeclaration(it),
        Statement::TSImportEqualsDeclaration(it) => AstKind::TSImportEqualsDeclaration(it),
        Statement::ImportDeclaration(it) => AstKind::ImportDeclaration(it),
        Statement::ExportAllDeclaration(it) => AstKind::ExportAllDeclaration(it),
        Statement::ExportDefaultDeclaration(it) => AstKind::ExportDefaultDeclaration(it),
        Statement::ExportNamedDeclaration(it) => AstKind::ExportNamedDeclaration(it),
        Statement::TSExportAssignment(it) => AstKind::TSExportAssignment(it),
        Statement::TSNamespaceExportDeclaration(it) => AstKind::TSNamespaceExportDeclaration(it),
    }
}
