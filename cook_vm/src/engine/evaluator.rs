// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tree-walking evaluation of precooked code.
//!
//! Expressions evaluate to a [`Value`], statements to a [`CompletionRecord`].
//! Thrown values travel as the `Err` side of [`JsResult`]; `break`,
//! `continue` and `return` never do.

mod assignment;
mod binding_initialization;
mod block_declaration_instantiation;
mod for_in_of_statement;
mod function_declaration_instantiation;
mod template_literals;

pub(crate) use function_declaration_instantiation::function_declaration_instantiation;

use oxc_allocator::UnstableAddress;
use oxc_ast::{AstKind, ast};
use oxc_ecmascript::BoundNames;
use oxc_span::{GetSpan, Span};
use oxc_syntax::operator::{BinaryOperator, LogicalOperator, UnaryOperator, UpdateOperator};
use wtf8::Wtf8Buf;

use self::{
    binding_initialization::binding_initialization,
    block_declaration_instantiation::block_declaration_instantiation,
    template_literals::get_template_object,
};
use crate::ecmascript::{
    abstract_operations::{
        operations_on_iterator_objects::{get_iterator, iterator_to_list},
        operations_on_objects::{
            call_function, construct, copy_data_properties, create_data_property_or_throw, delete,
            ordinary_object_create,
        },
        testing_and_comparison::{
            is_callable, is_constructor, is_less_than, is_loosely_equal, is_strictly_equal,
        },
        type_conversion::{
            number_to_string, to_boolean, to_number, to_primitive, to_property_key, to_string,
        },
    },
    builtins::{
        array::array_create,
        numbers_and_dates::math_object::exponentiate,
    },
    execution::{
        Agent, Branch, ExceptionType, JsError, JsResult, new_declarative_environment,
    },
    scripts_and_modules::{
        precook::{unsupported_expression, unsupported_statement},
        source_code::with_source_text,
    },
    syntax_directed_operations::{
        expression_type_name,
        function_definitions::{
            instantiate_arrow_function_expression, instantiate_ordinary_function_expression,
            is_anonymous_function_definition, named_evaluation,
        },
        statement_kind, statement_type_name,
    },
    types::{
        Base, CompletionRecord, CompletionType, JsString, PropertyKey, Reference, Value,
        get_value, initialize_referenced_binding, put_value,
    },
};

/// Runtime semantics of a node.
pub(crate) trait Evaluate<'a> {
    type Output;

    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Self::Output>;
}

/// Evaluation of a node that denotes a place rather than a value.
pub(crate) trait EvaluateReference<'a> {
    fn evaluate_reference(&'a self, agent: &mut Agent<'a>) -> JsResult<Reference>;
}

/// Result of evaluating an operand that may be a reference, as the
/// operands of `typeof`, `delete` and calls are.
pub(super) enum MaybeReference {
    Reference(Reference),
    Value(Value),
}

pub(crate) fn before_evaluate<'a>(agent: &Agent<'a>, node: AstKind<'a>) {
    if let Some(hooks) = &agent[agent.current_realm_id()].hooks {
        hooks.before_evaluate(node);
    }
}

/// Text of the cook being evaluated.
fn source_text<'a>(agent: &Agent<'a>) -> &'a str {
    agent[agent.current_realm_id()].source_text
}

/// SyntaxError for syntax the evaluator does not run, quoting the node's
/// source text.
pub(super) fn unsupported_node(agent: &mut Agent, kind: &str, span: Span) -> JsError {
    let message = with_source_text(
        format!("Unsupported node type `{kind}`"),
        source_text(agent),
        span,
    );
    agent.throw_exception(ExceptionType::SyntaxError, message)
}

pub(super) fn evaluate_maybe_reference<'a>(
    agent: &mut Agent<'a>,
    expression: &'a ast::Expression<'a>,
) -> JsResult<MaybeReference> {
    let expression = expression.get_inner_expression();
    let reference = match expression {
        ast::Expression::Identifier(identifier) => {
            before_evaluate(agent, AstKind::IdentifierReference(identifier));
            identifier.evaluate_reference(agent)?
        }
        ast::Expression::StaticMemberExpression(member) => {
            before_evaluate(agent, AstKind::StaticMemberExpression(member));
            member.evaluate_reference(agent)?
        }
        ast::Expression::ComputedMemberExpression(member) => {
            before_evaluate(agent, AstKind::ComputedMemberExpression(member));
            member.evaluate_reference(agent)?
        }
        _ => return Ok(MaybeReference::Value(expression.evaluate(agent)?)),
    };
    Ok(MaybeReference::Reference(reference))
}

impl<'a> EvaluateReference<'a> for ast::IdentifierReference<'a> {
    /// ### [13.1.3 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-identifiers-runtime-semantics-evaluation)
    fn evaluate_reference(&'a self, agent: &mut Agent<'a>) -> JsResult<Reference> {
        // IdentifierReference : Identifier
        // 1. Return ? ResolveBinding(StringValue of Identifier).
        Ok(agent.resolve_binding(&self.name, None))
    }
}

impl<'a> EvaluateReference<'a> for ast::StaticMemberExpression<'a> {
    fn evaluate_reference(&'a self, agent: &mut Agent<'a>) -> JsResult<Reference> {
        // MemberExpression : MemberExpression . IdentifierName
        // 1. Let baseReference be ? Evaluation of MemberExpression.
        // 2. Let baseValue be ? GetValue(baseReference).
        let base_value = self.object.evaluate(agent)?;
        // 4. Return EvaluatePropertyAccessWithIdentifierKey(baseValue, IdentifierName, strict).
        Ok(Reference::property(
            base_value,
            PropertyKey::from(self.property.name.as_str()),
            true,
        ))
    }
}

impl<'a> EvaluateReference<'a> for ast::ComputedMemberExpression<'a> {
    fn evaluate_reference(&'a self, agent: &mut Agent<'a>) -> JsResult<Reference> {
        // MemberExpression : MemberExpression [ Expression ]
        // 1. Let baseReference be ? Evaluation of MemberExpression.
        // 2. Let baseValue be ? GetValue(baseReference).
        let base_value = self.object.evaluate(agent)?;
        // 4. Return ? EvaluatePropertyAccessWithExpressionKey(baseValue, Expression, strict).
        let property_name_value = self.expression.evaluate(agent)?;
        let property_key = to_property_key(agent, &property_name_value)?;
        Ok(Reference::property(base_value, property_key, true))
    }
}

impl<'a> EvaluateReference<'a> for ast::SimpleAssignmentTarget<'a> {
    fn evaluate_reference(&'a self, agent: &mut Agent<'a>) -> JsResult<Reference> {
        match self {
            ast::SimpleAssignmentTarget::AssignmentTargetIdentifier(identifier) => {
                before_evaluate(agent, AstKind::IdentifierReference(identifier));
                identifier.evaluate_reference(agent)
            }
            ast::SimpleAssignmentTarget::StaticMemberExpression(member) => {
                before_evaluate(agent, AstKind::StaticMemberExpression(member));
                member.evaluate_reference(agent)
            }
            ast::SimpleAssignmentTarget::ComputedMemberExpression(member) => {
                before_evaluate(agent, AstKind::ComputedMemberExpression(member));
                member.evaluate_reference(agent)
            }
            ast::SimpleAssignmentTarget::TSAsExpression(target) => {
                expression_reference(agent, &target.expression)
            }
            ast::SimpleAssignmentTarget::TSSatisfiesExpression(target) => {
                expression_reference(agent, &target.expression)
            }
            ast::SimpleAssignmentTarget::TSNonNullExpression(target) => {
                expression_reference(agent, &target.expression)
            }
            ast::SimpleAssignmentTarget::TSTypeAssertion(target) => {
                expression_reference(agent, &target.expression)
            }
            _ => Err(unsupported_node(agent, "PrivateFieldExpression", self.span())),
        }
    }
}

fn expression_reference<'a>(
    agent: &mut Agent<'a>,
    expression: &'a ast::Expression<'a>,
) -> JsResult<Reference> {
    match evaluate_maybe_reference(agent, expression)? {
        MaybeReference::Reference(reference) => Ok(reference),
        MaybeReference::Value(_) => Err(agent.throw_exception_with_static_message(
            ExceptionType::SyntaxError,
            "Invalid left-hand side in assignment",
        )),
    }
}

impl<'a> Evaluate<'a> for ast::Expression<'a> {
    type Output = Value;

    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // Parentheses and type annotations evaluate to their operand.
        let expression = self.get_inner_expression();
        before_evaluate(agent, AstKind::from_expression(expression));
        let expression_only = agent[agent.current_realm_id()].expression_only;
        if let Some(kind) = unsupported_expression(expression, expression_only) {
            return Err(unsupported_node(agent, kind, expression.span()));
        }
        match expression {
            // Literal : NullLiteral
            // 1. Return null.
            ast::Expression::NullLiteral(_) => Ok(Value::Null),
            // Literal : BooleanLiteral
            // 1. If BooleanLiteral is the token false, return false.
            // 2. If BooleanLiteral is the token true, return true.
            ast::Expression::BooleanLiteral(literal) => Ok(Value::Boolean(literal.value)),
            // Literal : NumericLiteral
            // 1. Return the NumericValue of NumericLiteral.
            ast::Expression::NumericLiteral(literal) => Ok(Value::Number(literal.value)),
            // Literal : StringLiteral
            // 1. Return the SV of StringLiteral.
            ast::Expression::StringLiteral(literal) => Ok(Value::String(JsString::from_literal(
                literal.value.as_str(),
                literal.lone_surrogates,
            ))),
            ast::Expression::TemplateLiteral(literal) => literal.evaluate(agent),
            ast::Expression::Identifier(identifier) => {
                let reference = identifier.evaluate_reference(agent)?;
                get_value(agent, &reference)
            }
            ast::Expression::StaticMemberExpression(member) => {
                let reference = member.evaluate_reference(agent)?;
                get_value(agent, &reference)
            }
            ast::Expression::ComputedMemberExpression(member) => {
                let reference = member.evaluate_reference(agent)?;
                get_value(agent, &reference)
            }
            ast::Expression::ArrayExpression(array) => array.evaluate(agent),
            ast::Expression::ObjectExpression(object) => object.evaluate(agent),
            ast::Expression::ArrowFunctionExpression(arrow) => Ok(Value::Object(
                instantiate_arrow_function_expression(agent, arrow),
            )),
            ast::Expression::FunctionExpression(function) => Ok(Value::Object(
                instantiate_ordinary_function_expression(agent, function),
            )),
            ast::Expression::UnaryExpression(unary) => unary.evaluate(agent),
            ast::Expression::BinaryExpression(binary) => binary.evaluate(agent),
            ast::Expression::LogicalExpression(logical) => logical.evaluate(agent),
            ast::Expression::ConditionalExpression(conditional) => {
                // ConditionalExpression : ShortCircuitExpression ? AssignmentExpression : AssignmentExpression
                // 1. Let lref be ? Evaluation of ShortCircuitExpression.
                // 2. Let lval be ToBoolean(? GetValue(lref)).
                let lval = conditional.test.evaluate(agent)?;
                // 3. If lval is true, then
                if to_boolean(&lval) {
                    // a. Let trueRef be ? Evaluation of the first AssignmentExpression.
                    // b. Return ? GetValue(trueRef).
                    conditional.consequent.evaluate(agent)
                } else {
                    // 4. Else,
                    // a. Let falseRef be ? Evaluation of the second AssignmentExpression.
                    // b. Return ? GetValue(falseRef).
                    conditional.alternate.evaluate(agent)
                }
            }
            ast::Expression::AssignmentExpression(assignment) => assignment.evaluate(agent),
            ast::Expression::UpdateExpression(update) => update.evaluate(agent),
            ast::Expression::SequenceExpression(sequence) => {
                // Expression : Expression , AssignmentExpression
                let mut value = Value::Undefined;
                for expression in &sequence.expressions {
                    value = expression.evaluate(agent)?;
                }
                Ok(value)
            }
            ast::Expression::CallExpression(call) => call.evaluate(agent),
            ast::Expression::NewExpression(new) => new.evaluate(agent),
            ast::Expression::ChainExpression(chain) => chain.evaluate(agent),
            ast::Expression::TaggedTemplateExpression(tagged) => tagged.evaluate(agent),
            _ => Err(unsupported_node(agent, expression_type_name(expression), expression.span())),
        }
    }
}

impl<'a> Evaluate<'a> for ast::ArrayExpression<'a> {
    type Output = Value;

    /// ### [13.2.4.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-array-initializer-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // 1. Let array be ! ArrayCreate(0).
        // 2. Perform ? ArrayAccumulation of ElementList with arguments array and 0.
        let mut elements = Vec::with_capacity(self.elements.len());
        for element in &self.elements {
            match element {
                // Elision : ,
                ast::ArrayExpressionElement::Elision(_) => elements.push(None),
                // SpreadElement : ... AssignmentExpression
                ast::ArrayExpressionElement::SpreadElement(spread) => {
                    // 1. Let spreadRef be ? Evaluation of AssignmentExpression.
                    // 2. Let spreadObj be ? GetValue(spreadRef).
                    let spread_obj = spread.argument.evaluate(agent)?;
                    // 3. Let iteratorRecord be ? GetIterator(spreadObj, SYNC).
                    let mut iterator_record = get_iterator(agent, &spread_obj)?;
                    // 4. Repeat,
                    //    a. Let next be ? IteratorStepValue(iteratorRecord).
                    //    b. If next is DONE, return nextIndex.
                    //    c. Perform ! CreateDataPropertyOrThrow(array, ! ToString(𝔽(nextIndex)), next).
                    elements.extend(iterator_to_list(agent, &mut iterator_record).into_iter().map(Some));
                }
                // ElementList : Elisionopt AssignmentExpression
                _ => {
                    let Some(expression) = element.as_expression() else {
                        unreachable!("array element is an expression")
                    };
                    // 1. Let initResult be ? Evaluation of AssignmentExpression.
                    // 2. Let initValue be ? GetValue(initResult).
                    elements.push(Some(expression.evaluate(agent)?));
                }
            }
        }
        // 3. Return array.
        Ok(Value::Object(array_create(agent, elements)))
    }
}

impl<'a> Evaluate<'a> for ast::ObjectExpression<'a> {
    type Output = Value;

    /// ### [13.2.5.4 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-object-initializer-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // ObjectLiteral : { PropertyDefinitionList }
        // 1. Let obj be OrdinaryObjectCreate(%Object.prototype%).
        let object = ordinary_object_create(agent);
        // 2. Perform ? PropertyDefinitionEvaluation of PropertyDefinitionList with argument obj.
        for property in &self.properties {
            match property {
                // PropertyDefinition : ... AssignmentExpression
                ast::ObjectPropertyKind::SpreadProperty(spread) => {
                    // 1. Let exprValue be ? Evaluation of AssignmentExpression.
                    // 2. Let fromValue be ? GetValue(exprValue).
                    let from_value = spread.argument.evaluate(agent)?;
                    // 3. Let excludedNames be a new empty List.
                    // 4. Perform ? CopyDataProperties(object, fromValue, excludedNames).
                    copy_data_properties(agent, object, &from_value, &[])?;
                }
                // PropertyDefinition : PropertyName : AssignmentExpression
                ast::ObjectPropertyKind::ObjectProperty(property) => {
                    if property.kind != ast::PropertyKind::Init {
                        return Err(agent.throw_exception_with_static_message(
                            ExceptionType::SyntaxError,
                            "Unsupported object getter/setter",
                        ));
                    }
                    // 1. Let propKey be ? Evaluation of PropertyName.
                    let property_key =
                        evaluate_property_key(agent, &property.key, property.computed)?;
                    // 3. If IsAnonymousFunctionDefinition(AssignmentExpression) is true, then
                    //    a. Let propValue be ? NamedEvaluation of AssignmentExpression with argument propKey.
                    // 4. Else,
                    //    a. Let exprValueRef be ? Evaluation of AssignmentExpression.
                    //    b. Let propValue be ? GetValue(exprValueRef).
                    let property_value = if is_anonymous_function_definition(&property.value) {
                        let name = property_key.as_str().unwrap_or_default().to_owned();
                        named_evaluation(agent, &property.value, &name)?
                    } else {
                        property.value.evaluate(agent)?
                    };
                    // 6. Perform ! CreateDataPropertyOrThrow(object, propKey, propValue).
                    create_data_property_or_throw(agent, object, property_key, property_value)?;
                }
            }
        }
        // 3. Return obj.
        Ok(Value::Object(object))
    }
}

/// ### [13.2.5.4 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-object-initializer-runtime-semantics-evaluation)
///
/// PropertyName. Keys written as identifiers or literals are taken as
/// written; computed keys are evaluated.
pub(super) fn evaluate_property_key<'a>(
    agent: &mut Agent<'a>,
    key: &'a ast::PropertyKey<'a>,
    computed: bool,
) -> JsResult<PropertyKey> {
    match key {
        // LiteralPropertyName : IdentifierName
        // 1. Return StringValue of IdentifierName.
        ast::PropertyKey::StaticIdentifier(identifier) => {
            Ok(PropertyKey::from(identifier.name.as_str()))
        }
        ast::PropertyKey::PrivateIdentifier(identifier) => {
            Err(unsupported_node(agent, "PrivateIdentifier", identifier.span))
        }
        // LiteralPropertyName : StringLiteral
        // 1. Return the SV of StringLiteral.
        ast::PropertyKey::StringLiteral(literal) if !computed => {
            Ok(PropertyKey::String(JsString::from_literal(
                literal.value.as_str(),
                literal.lone_surrogates,
            )))
        }
        // LiteralPropertyName : NumericLiteral
        // 1. Let nbr be the NumericValue of NumericLiteral.
        // 2. Return ! ToString(nbr).
        ast::PropertyKey::NumericLiteral(literal) if !computed => {
            Ok(PropertyKey::from(number_to_string(literal.value)))
        }
        // ComputedPropertyName : [ AssignmentExpression ]
        _ => {
            let Some(expression) = key.as_expression() else {
                unreachable!("property key is an expression")
            };
            // 1. Let exprValue be ? Evaluation of AssignmentExpression.
            // 2. Let propName be ? GetValue(exprValue).
            let property_name = expression.evaluate(agent)?;
            // 3. Return ? ToPropertyKey(propName).
            to_property_key(agent, &property_name)
        }
    }
}

impl<'a> Evaluate<'a> for ast::UnaryExpression<'a> {
    type Output = Value;

    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        match self.operator {
            // ### [13.5.1.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-delete-operator-runtime-semantics-evaluation)
            UnaryOperator::Delete => evaluate_delete(agent, &self.argument),
            // ### [13.5.3.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-typeof-operator-runtime-semantics-evaluation)
            UnaryOperator::Typeof => {
                // 1. Let val be ? Evaluation of UnaryExpression.
                let value = match evaluate_maybe_reference(agent, &self.argument)? {
                    // 2. If val is a Reference Record, then
                    //    a. If IsUnresolvableReference(val) is true, return "undefined".
                    MaybeReference::Reference(reference)
                        if reference.is_unresolvable_reference() =>
                    {
                        return Ok(Value::from("undefined"));
                    }
                    // 3. Set val to ? GetValue(val).
                    MaybeReference::Reference(reference) => get_value(agent, &reference)?,
                    MaybeReference::Value(value) => value,
                };
                // 4-14. Return the type tag of val.
                Ok(Value::from(value.type_of(agent)))
            }
            // ### [13.5.2.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-void-operator-runtime-semantics-evaluation)
            UnaryOperator::Void => {
                // 1. Let expr be ? Evaluation of UnaryExpression.
                // 2. Perform ? GetValue(expr).
                self.argument.evaluate(agent)?;
                // 3. Return undefined.
                Ok(Value::Undefined)
            }
            // ### [13.5.7.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-logical-not-operator-runtime-semantics-evaluation)
            UnaryOperator::LogicalNot => {
                // 1. Let expr be ? Evaluation of UnaryExpression.
                // 2. Let oldValue be ToBoolean(? GetValue(expr)).
                let old_value = to_boolean(&self.argument.evaluate(agent)?);
                // 3. If oldValue is true, return false.
                // 4. Return true.
                Ok(Value::Boolean(!old_value))
            }
            // ### [13.5.5.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-unary-minus-operator-runtime-semantics-evaluation)
            UnaryOperator::UnaryNegation => {
                // 1. Let expr be ? Evaluation of UnaryExpression.
                // 2. Let oldValue be ? ToNumeric(? GetValue(expr)).
                let old_value = self.argument.evaluate(agent)?;
                let old_value = to_number(agent, &old_value)?;
                // 3. If oldValue is a Number, then
                //    a. Return Number::unaryMinus(oldValue).
                Ok(Value::Number(-old_value))
            }
            // ### [13.5.4.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-unary-plus-operator-runtime-semantics-evaluation)
            UnaryOperator::UnaryPlus => {
                // 1. Let expr be ? Evaluation of UnaryExpression.
                // 2. Return ? ToNumber(? GetValue(expr)).
                let value = self.argument.evaluate(agent)?;
                Ok(Value::Number(to_number(agent, &value)?))
            }
            UnaryOperator::BitwiseNot => Err(agent.throw_exception(
                ExceptionType::SyntaxError,
                format!("Unsupported unary operator `{}`", self.operator.as_str()),
            )),
        }
    }
}

fn evaluate_delete<'a>(
    agent: &mut Agent<'a>,
    argument: &'a ast::Expression<'a>,
) -> JsResult<Value> {
    // 1. Let ref be ? Evaluation of UnaryExpression.
    // 2. If ref is not a Reference Record, return true.
    let MaybeReference::Reference(reference) = evaluate_maybe_reference(agent, argument)? else {
        return Ok(Value::Boolean(true));
    };
    let deleted = match &reference.base {
        // 3. If IsUnresolvableReference(ref) is true, then
        //    b. Return true.
        Base::Unresolvable => return Ok(Value::Boolean(true)),
        // 5. Else,
        //    a. Let base be ref.[[Base]].
        //    b. Assert: base is an Environment Record.
        //    c. Return ? base.DeleteBinding(ref.[[ReferencedName]]).
        Base::Environment(env) => {
            let name = reference.referenced_name.as_str().unwrap_or_default();
            return Ok(Value::Boolean(env.delete_binding(agent, name)));
        }
        // 4. If IsPropertyReference(ref) is true, then
        //    c. Let baseObj be ? ToObject(ref.[[Base]]).
        //    d. Let deleteStatus be ? baseObj.[[Delete]](ref.[[ReferencedName]]).
        Base::Value(Value::Object(base)) => delete(agent, *base, &reference.referenced_name),
        Base::Value(Value::Undefined | Value::Null) => {
            return Err(agent.throw_exception_with_static_message(
                ExceptionType::TypeError,
                "Cannot convert undefined or null to object",
            ));
        }
        // String wrappers own their length and one property per code unit.
        Base::Value(Value::String(string)) => {
            let key = &reference.referenced_name;
            key.as_str() != Some("length")
                && key
                    .as_array_index()
                    .is_none_or(|index| index as usize >= string.utf16_len())
        }
        Base::Value(_) => true,
    };
    // e. If deleteStatus is false and ref.[[Strict]] is true, throw a TypeError exception.
    if !deleted && reference.strict {
        let base = match &reference.base {
            Base::Value(Value::Object(object)) if object.is_array(agent) => "[object Array]",
            Base::Value(Value::String(_)) => "[object String]",
            _ => "#<Object>",
        };
        let message = format!(
            "Cannot delete property '{}' of {base}",
            reference.referenced_name.to_display(agent)
        );
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    }
    // f. Return deleteStatus.
    Ok(Value::Boolean(deleted))
}

impl<'a> Evaluate<'a> for ast::BinaryExpression<'a> {
    type Output = Value;

    /// ### [13.15.4 EvaluateStringOrNumericBinaryExpression ( leftOperand, opText, rightOperand )](https://tc39.es/ecma262/#sec-evaluatestringornumericbinaryexpression)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        if !is_supported_binary_operator(self.operator) {
            return Err(agent.throw_exception(
                ExceptionType::SyntaxError,
                format!("Unsupported binary operator `{}`", self.operator.as_str()),
            ));
        }
        // 1. Let lRef be ? Evaluation of leftOperand.
        // 2. Let lVal be ? GetValue(lRef).
        let lval = self.left.evaluate(agent)?;
        // 3. Let rRef be ? Evaluation of rightOperand.
        // 4. Let rVal be ? GetValue(rRef).
        let rval = self.right.evaluate(agent)?;
        // 5. Return ? ApplyStringOrNumericBinaryOperator(lVal, opText, rVal).
        apply_string_or_numeric_binary_operator(agent, &lval, self.operator, &rval)
    }
}

pub(super) fn is_supported_binary_operator(operator: BinaryOperator) -> bool {
    matches!(
        operator,
        BinaryOperator::Equality
            | BinaryOperator::Inequality
            | BinaryOperator::StrictEquality
            | BinaryOperator::StrictInequality
            | BinaryOperator::LessThan
            | BinaryOperator::LessEqualThan
            | BinaryOperator::GreaterThan
            | BinaryOperator::GreaterEqualThan
            | BinaryOperator::Addition
            | BinaryOperator::Subtraction
            | BinaryOperator::Multiplication
            | BinaryOperator::Division
            | BinaryOperator::Remainder
            | BinaryOperator::Exponential
    )
}

/// ### [13.15.3 ApplyStringOrNumericBinaryOperator ( lVal, opText, rVal )](https://tc39.es/ecma262/#sec-applystringornumericbinaryoperator)
///
/// Also covers the relational and equality operators.
pub(super) fn apply_string_or_numeric_binary_operator(
    agent: &mut Agent,
    lval: &Value,
    operator: BinaryOperator,
    rval: &Value,
) -> JsResult<Value> {
    let result = match operator {
        // ### [13.11.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-equality-operators-runtime-semantics-evaluation)
        BinaryOperator::Equality => is_loosely_equal(agent, lval, rval)?,
        BinaryOperator::Inequality => !is_loosely_equal(agent, lval, rval)?,
        BinaryOperator::StrictEquality => is_strictly_equal(lval, rval),
        BinaryOperator::StrictInequality => !is_strictly_equal(lval, rval),
        // ### [13.10.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-relational-operators-runtime-semantics-evaluation)
        // RelationalExpression : RelationalExpression < ShiftExpression
        // 5. Let r be ? IsLessThan(lval, rval, true).
        // 6. If r is undefined, return false. Otherwise, return r.
        BinaryOperator::LessThan => is_less_than::<true>(agent, lval, rval)? == Some(true),
        // RelationalExpression : RelationalExpression > ShiftExpression
        // 5. Let r be ? IsLessThan(rval, lval, false).
        BinaryOperator::GreaterThan => is_less_than::<false>(agent, rval, lval)? == Some(true),
        // RelationalExpression : RelationalExpression <= ShiftExpression
        // 5. Let r be ? IsLessThan(rval, lval, false).
        // 6. If r is either true or undefined, return false. Otherwise, return true.
        BinaryOperator::LessEqualThan => is_less_than::<false>(agent, rval, lval)? == Some(false),
        // RelationalExpression : RelationalExpression >= ShiftExpression
        // 5. Let r be ? IsLessThan(lval, rval, true).
        BinaryOperator::GreaterEqualThan => is_less_than::<true>(agent, lval, rval)? == Some(false),
        // 1. If opText is +, then
        BinaryOperator::Addition => {
            // a. Let lprim be ? ToPrimitive(lVal).
            let lprim = to_primitive(agent, lval, None)?;
            // b. Let rprim be ? ToPrimitive(rVal).
            let rprim = to_primitive(agent, rval, None)?;
            // c. If lprim is a String or rprim is a String, then
            if lprim.is_string() || rprim.is_string() {
                // i. Let lstr be ? ToString(lprim).
                let lstr = to_string(agent, &lprim)?;
                // ii. Let rstr be ? ToString(rprim).
                let rstr = to_string(agent, &rprim)?;
                // iii. Return the string-concatenation of lstr and rstr.
                return Ok(Value::String(lstr.concat(&rstr)));
            }
            // d. Set lVal to lprim.
            // e. Set rVal to rprim.
            let lnum = to_number(agent, &lprim)?;
            let rnum = to_number(agent, &rprim)?;
            return Ok(Value::Number(lnum + rnum));
        }
        _ => {
            // 3. Let lNum be ? ToNumeric(lVal).
            let lnum = to_number(agent, lval)?;
            // 4. Let rNum be ? ToNumeric(rVal).
            let rnum = to_number(agent, rval)?;
            // 7. Let operation be the abstract operation associated with
            //    opText and Type(lNum) in the following table:
            let result = match operator {
                BinaryOperator::Subtraction => lnum - rnum,
                BinaryOperator::Multiplication => lnum * rnum,
                BinaryOperator::Division => lnum / rnum,
                BinaryOperator::Remainder => lnum % rnum,
                BinaryOperator::Exponential => exponentiate(lnum, rnum),
                _ => unreachable!("operator was checked before evaluation"),
            };
            // 8. Return operation(lNum, rNum).
            return Ok(Value::Number(result));
        }
    };
    Ok(Value::Boolean(result))
}

impl<'a> Evaluate<'a> for ast::LogicalExpression<'a> {
    type Output = Value;

    /// ### [13.13.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-binary-logical-operators-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        if self.operator == LogicalOperator::Or && self.is_pipeline(agent) {
            return evaluate_pipeline(agent, self);
        }
        // 1. Let lref be ? Evaluation of LogicalANDExpression.
        // 2. Let lval be ? GetValue(lref).
        let lval = self.left.evaluate(agent)?;
        let short_circuit = match self.operator {
            // 3. If ToBoolean(lval) is false, return lval.
            LogicalOperator::And => !to_boolean(&lval),
            // 3. If ToBoolean(lval) is true, return lval.
            LogicalOperator::Or => to_boolean(&lval),
            // 3. If lval is neither undefined nor null, return lval.
            LogicalOperator::Coalesce => !lval.is_nullish(),
        };
        if short_circuit {
            return Ok(lval);
        }
        // 4. Let rref be ? Evaluation of BitwiseORExpression.
        // 5. Return ? GetValue(rref).
        self.right.evaluate(agent)
    }
}

trait PipelineOperator {
    fn is_pipeline(&self, agent: &Agent) -> bool;
}

impl PipelineOperator for ast::LogicalExpression<'_> {
    /// `|>` was rewritten to `||` before parsing; the operator token lies
    /// between the operands.
    fn is_pipeline(&self, agent: &Agent) -> bool {
        agent[agent.current_realm_id()]
            .contains_pipeline_operator(self.left.span().end, self.right.span().start)
    }
}

/// `left |> right` calls `right` with the value of `left`.
fn evaluate_pipeline<'a>(
    agent: &mut Agent<'a>,
    pipeline: &'a ast::LogicalExpression<'a>,
) -> JsResult<Value> {
    let argument = pipeline.left.evaluate(agent)?;
    let func = pipeline.right.evaluate(agent)?;
    let Some(func) = is_callable(agent, &func) else {
        let message = format!(
            "{} is not a function",
            pipeline.right.span().source_text(source_text(agent))
        );
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    call_function(agent, func, Value::Undefined, &[argument])
}

impl<'a> Evaluate<'a> for ast::UpdateExpression<'a> {
    type Output = Value;

    /// ### [13.4.2.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-postfix-increment-operator-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // 1. Let lhs be ? Evaluation of LeftHandSideExpression.
        let lhs = self.argument.evaluate_reference(agent)?;
        // 2. Let oldValue be ? ToNumeric(? GetValue(lhs)).
        let old_value = get_value(agent, &lhs)?;
        let old_value = to_number(agent, &old_value)?;
        // 3. If oldValue is a Number, then
        //    a. Let newValue be Number::add(oldValue, 1𝔽).
        let new_value = match self.operator {
            UpdateOperator::Increment => old_value + 1.0,
            UpdateOperator::Decrement => old_value - 1.0,
        };
        // 5. Perform ? PutValue(lhs, newValue).
        put_value(agent, &lhs, Value::Number(new_value))?;
        // 6. Return oldValue.
        // Prefix forms return newValue.
        Ok(Value::Number(if self.prefix { new_value } else { old_value }))
    }
}

/// The function and `this` value a callee evaluates to.
fn evaluate_callee<'a>(
    agent: &mut Agent<'a>,
    callee: &'a ast::Expression<'a>,
) -> JsResult<(Value, Value)> {
    Ok(match evaluate_maybe_reference(agent, callee)? {
        MaybeReference::Reference(reference) => {
            // 2. Let func be ? GetValue(ref).
            let func = get_value(agent, &reference)?;
            // 4. If ref is a Reference Record, IsPropertyReference(ref) is
            //    true, let thisValue be GetThisValue(ref).
            let this_value = match reference.base {
                Base::Value(base) => base,
                _ => Value::Undefined,
            };
            (func, this_value)
        }
        MaybeReference::Value(func) => (func, Value::Undefined),
    })
}

/// ### [13.3.6.2 EvaluateCall ( func, ref, arguments, tailPosition )](https://tc39.es/ecma262/#sec-evaluatecall)
fn evaluate_call<'a>(
    agent: &mut Agent<'a>,
    func: Value,
    this_value: Value,
    arguments: &'a [ast::Argument<'a>],
    callee: &'a ast::Expression<'a>,
) -> JsResult<Value> {
    // 3. Let argList be ? ArgumentListEvaluation of arguments.
    let argument_list = argument_list_evaluation(agent, arguments)?;
    // 4. If func is not an Object, throw a TypeError exception.
    // 5. If IsCallable(func) is false, throw a TypeError exception.
    let Some(func) = is_callable(agent, &func) else {
        let message = format!(
            "{} is not a function",
            callee.span().source_text(source_text(agent))
        );
        return Err(agent.throw_exception(ExceptionType::TypeError, message));
    };
    // 8. Return ? Call(func, thisValue, argList).
    call_function(agent, func, this_value, &argument_list)
}

/// ### [13.3.8.1 Runtime Semantics: ArgumentListEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-argumentlistevaluation)
fn argument_list_evaluation<'a>(
    agent: &mut Agent<'a>,
    arguments: &'a [ast::Argument<'a>],
) -> JsResult<Vec<Value>> {
    let mut list = Vec::with_capacity(arguments.len());
    for argument in arguments {
        match argument {
            // ArgumentList : ... AssignmentExpression
            ast::Argument::SpreadElement(spread) => {
                // 1. Let list be a new empty List.
                // 2. Let spreadRef be ? Evaluation of AssignmentExpression.
                // 3. Let spreadObj be ? GetValue(spreadRef).
                let spread_obj = spread.argument.evaluate(agent)?;
                // 4. Let iteratorRecord be ? GetIterator(spreadObj, SYNC).
                let mut iterator_record = get_iterator(agent, &spread_obj)?;
                // 5. Repeat,
                //    a. Let next be ? IteratorStepValue(iteratorRecord).
                //    b. If next is DONE, return list.
                //    c. Append next to list.
                list.extend(iterator_to_list(agent, &mut iterator_record));
            }
            // ArgumentList : AssignmentExpression
            _ => {
                let Some(expression) = argument.as_expression() else {
                    unreachable!("argument is an expression")
                };
                // 1. Let ref be ? Evaluation of AssignmentExpression.
                // 2. Let arg be ? GetValue(ref).
                // 3. Return « arg ».
                list.push(expression.evaluate(agent)?);
            }
        }
    }
    Ok(list)
}

impl<'a> Evaluate<'a> for ast::CallExpression<'a> {
    type Output = Value;

    /// ### [13.3.6.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-function-calls-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // CallExpression : CoverCallExpressionAndAsyncArrowHead
        // 3. Let ref be ? Evaluation of memberExpr.
        // 4. Let func be ? GetValue(ref).
        let (func, this_value) = evaluate_callee(agent, &self.callee)?;
        // 7. Return ? EvaluateCall(func, ref, arguments, tailCall).
        evaluate_call(agent, func, this_value, &self.arguments, &self.callee)
    }
}

impl<'a> Evaluate<'a> for ast::NewExpression<'a> {
    type Output = Value;

    /// ### [13.3.5.1.1 EvaluateNew ( constructExpr, arguments )](https://tc39.es/ecma262/#sec-evaluatenew)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // 1. Let ref be ? Evaluation of constructExpr.
        // 2. Let constructor be ? GetValue(ref).
        let constructor = self.callee.evaluate(agent)?;
        // 3. If arguments is EMPTY, then
        //    a. Let argList be a new empty List.
        // 4. Else,
        //    a. Let argList be ? ArgumentListEvaluation of arguments.
        let argument_list = argument_list_evaluation(agent, &self.arguments)?;
        // 5. If IsConstructor(constructor) is false, throw a TypeError exception.
        if is_constructor(agent, &constructor).is_none() {
            let message = format!(
                "{} is not a constructor",
                self.callee.span().source_text(source_text(agent))
            );
            return Err(agent.throw_exception(ExceptionType::TypeError, message));
        }
        // 6. Return ? Construct(constructor, argList).
        construct(agent, &constructor, &argument_list)
    }
}

/// Value of a link of an optional chain and the `this` value a call of it
/// would receive. `None` once the chain has short-circuited.
type ChainLink = Option<(Value, Value)>;

impl<'a> Evaluate<'a> for ast::ChainExpression<'a> {
    type Output = Value;

    /// ### [13.3.9.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-optional-chaining-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        let link = match &self.expression {
            ast::ChainElement::CallExpression(call) => chain_call(agent, call)?,
            ast::ChainElement::TSNonNullExpression(expression) => {
                chain_link(agent, &expression.expression)?
            }
            ast::ChainElement::StaticMemberExpression(member) => {
                chain_static_member(agent, member)?
            }
            ast::ChainElement::ComputedMemberExpression(member) => {
                chain_computed_member(agent, member)?
            }
            _ => {
                let span = self.expression.span();
                return Err(unsupported_node(agent, "PrivateFieldExpression", span));
            }
        };
        // 3. If baseValue is either undefined or null, then
        //    a. Return undefined.
        Ok(link.map_or(Value::Undefined, |(value, _)| value))
    }
}

fn chain_link<'a>(agent: &mut Agent<'a>, expression: &'a ast::Expression<'a>) -> JsResult<ChainLink> {
    match expression {
        ast::Expression::CallExpression(call) => chain_call(agent, call),
        ast::Expression::StaticMemberExpression(member) => chain_static_member(agent, member),
        ast::Expression::ComputedMemberExpression(member) => chain_computed_member(agent, member),
        ast::Expression::TSNonNullExpression(expression) => chain_link(agent, &expression.expression),
        _ => Ok(Some((expression.evaluate(agent)?, Value::Undefined))),
    }
}

fn chain_static_member<'a>(
    agent: &mut Agent<'a>,
    member: &'a ast::StaticMemberExpression<'a>,
) -> JsResult<ChainLink> {
    before_evaluate(agent, AstKind::StaticMemberExpression(member));
    let Some((base_value, _)) = chain_link(agent, &member.object)? else {
        return Ok(None);
    };
    // OptionalChain : ?. IdentifierName
    if member.optional && base_value.is_nullish() {
        return Ok(None);
    }
    let reference = Reference::property(
        base_value.clone(),
        PropertyKey::from(member.property.name.as_str()),
        true,
    );
    Ok(Some((get_value(agent, &reference)?, base_value)))
}

fn chain_computed_member<'a>(
    agent: &mut Agent<'a>,
    member: &'a ast::ComputedMemberExpression<'a>,
) -> JsResult<ChainLink> {
    before_evaluate(agent, AstKind::ComputedMemberExpression(member));
    let Some((base_value, _)) = chain_link(agent, &member.object)? else {
        return Ok(None);
    };
    // OptionalChain : ?. [ Expression ]
    if member.optional && base_value.is_nullish() {
        return Ok(None);
    }
    let property_name_value = member.expression.evaluate(agent)?;
    let property_key = to_property_key(agent, &property_name_value)?;
    let reference = Reference::property(base_value.clone(), property_key, true);
    Ok(Some((get_value(agent, &reference)?, base_value)))
}

fn chain_call<'a>(agent: &mut Agent<'a>, call: &'a ast::CallExpression<'a>) -> JsResult<ChainLink> {
    before_evaluate(agent, AstKind::CallExpression(call));
    let Some((func, this_value)) = chain_link(agent, &call.callee)? else {
        return Ok(None);
    };
    // OptionalChain : ?. Arguments
    if call.optional && func.is_nullish() {
        return Ok(None);
    }
    let value = evaluate_call(agent, func, this_value, &call.arguments, &call.callee)?;
    Ok(Some((value, Value::Undefined)))
}

impl<'a> Evaluate<'a> for ast::TemplateLiteral<'a> {
    type Output = Value;

    /// ### [13.2.8.6 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-template-literals-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        let mut result = Wtf8Buf::new();
        for (index, quasi) in self.quasis.iter().enumerate() {
            // TemplateHead : ` TemplateCharacters ${
            // 1. Let head be the TV of TemplateHead.
            let head = match &quasi.value.cooked {
                Some(cooked) => JsString::from_literal(cooked.as_str(), quasi.lone_surrogates),
                None => JsString::from(quasi.value.raw.as_str()),
            };
            result.push_wtf8(head.as_wtf8());
            if let Some(expression) = self.expressions.get(index) {
                // 2. Let subRef be ? Evaluation of Expression.
                // 3. Let sub be ? GetValue(subRef).
                let sub = expression.evaluate(agent)?;
                // 4. Let middle be ? ToString(sub).
                let middle = to_string(agent, &sub)?;
                result.push_wtf8(middle.as_wtf8());
            }
        }
        // 6. Return the string-concatenation of head, middle, and tail.
        Ok(Value::String(JsString::from(result)))
    }
}

impl<'a> Evaluate<'a> for ast::TaggedTemplateExpression<'a> {
    type Output = Value;

    /// ### [13.3.11.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-tagged-templates-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        // MemberExpression : MemberExpression TemplateLiteral
        // 1. Let tagRef be ? Evaluation of MemberExpression.
        // 2. Let tagFunc be ? GetValue(tagRef).
        let (tag_func, this_value) = evaluate_callee(agent, &self.tag)?;
        // ArgumentListEvaluation of TemplateLiteral:
        // 1. Let templateLiteral be this TemplateLiteral.
        // 2. Let siteObj be GetTemplateObject(templateLiteral).
        let site_obj = get_template_object(agent, &self.quasi);
        let mut argument_list = Vec::with_capacity(self.quasi.expressions.len() + 1);
        argument_list.push(Value::Object(site_obj));
        // 3. Let remaining be ? ArgumentListEvaluation of SubstitutionTemplate.
        for expression in &self.quasi.expressions {
            argument_list.push(expression.evaluate(agent)?);
        }
        let Some(tag_func) = is_callable(agent, &tag_func) else {
            let message = format!(
                "{} is not a function",
                self.tag.span().source_text(source_text(agent))
            );
            return Err(agent.throw_exception(ExceptionType::TypeError, message));
        };
        call_function(agent, tag_func, this_value, &argument_list)
    }
}

impl<'a> Evaluate<'a> for ast::VariableDeclaration<'a> {
    type Output = ();

    /// ### [14.3.1.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-let-and-const-declarations-runtime-semantics-evaluation)
    /// ### [14.3.2.1 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-variable-statement-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<()> {
        // `declare` statements only describe types.
        if self.declare {
            return Ok(());
        }
        let is_var = self.kind.is_var();
        for declarator in &self.declarations {
            let ast::BindingPattern::BindingIdentifier(identifier) = &declarator.id else {
                // LexicalBinding : BindingPattern Initializer
                // VariableDeclaration : BindingPattern Initializer
                let Some(init) = &declarator.init else {
                    continue;
                };
                // 1. Let rhs be ? Evaluation of Initializer.
                // 2. Let rval be ? GetValue(rhs).
                let rval = init.evaluate(agent)?;
                // 3. Let env be the running execution context's LexicalEnvironment.
                // 4. Return ? BindingInitialization of BindingPattern with arguments rval and env.
                // A var binding pattern is initialized with undefined as env.
                let environment = if is_var {
                    None
                } else {
                    Some(agent.current_lexical_environment())
                };
                binding_initialization(agent, &declarator.id, rval, environment)?;
                continue;
            };
            let name = identifier.name.as_str();
            // 1. Let bindingId be StringValue of BindingIdentifier.
            // 2. Let lhs be ? ResolveBinding(bindingId).
            let lhs = agent.resolve_binding(name, None);
            match &declarator.init {
                // VariableDeclaration : BindingIdentifier
                // 1. Return EMPTY.
                None if is_var => {}
                // LexicalBinding : BindingIdentifier
                // 2. Perform ! InitializeReferencedBinding(lhs, undefined).
                None => initialize_referenced_binding(agent, &lhs, Value::Undefined)?,
                Some(init) => {
                    // 3. If IsAnonymousFunctionDefinition(Initializer) is true, then
                    //    a. Let value be ? NamedEvaluation of Initializer with argument bindingId.
                    // 4. Else,
                    //    a. Let rhs be ? Evaluation of Initializer.
                    //    b. Let value be ? GetValue(rhs).
                    let value = if is_anonymous_function_definition(init) {
                        named_evaluation(agent, init, name)?
                    } else {
                        init.evaluate(agent)?
                    };
                    if is_var {
                        // 5. Perform ? PutValue(lhs, value).
                        put_value(agent, &lhs, value)?;
                    } else {
                        // 5. Perform ! InitializeReferencedBinding(lhs, value).
                        initialize_referenced_binding(agent, &lhs, value)?;
                    }
                }
            }
        }
        // 6. Return EMPTY.
        Ok(())
    }
}

impl<'a> Evaluate<'a> for ast::Statement<'a> {
    type Output = CompletionRecord;

    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        if let ast::Statement::BlockStatement(block) = self {
            return block.evaluate(agent);
        }
        before_evaluate(agent, statement_kind(self));
        if let Some(kind) = unsupported_statement(self) {
            return Err(unsupported_node(agent, kind, self.span()));
        }
        match self {
            // EmptyStatement : ;
            // 1. Return EMPTY.
            ast::Statement::EmptyStatement(_) => Ok(CompletionRecord::empty()),
            // ExpressionStatement : Expression ;
            // 1. Let exprRef be ? Evaluation of Expression.
            // 2. Return ? GetValue(exprRef).
            ast::Statement::ExpressionStatement(statement) => Ok(CompletionRecord::normal(
                statement.expression.evaluate(agent)?,
            )),
            ast::Statement::VariableDeclaration(declaration) => {
                declaration.evaluate(agent)?;
                Ok(CompletionRecord::empty())
            }
            // FunctionDeclaration : function BindingIdentifier ( FormalParameters ) { FunctionBody }
            // 1. Return EMPTY.
            ast::Statement::FunctionDeclaration(_)
            | ast::Statement::TSTypeAliasDeclaration(_)
            | ast::Statement::TSInterfaceDeclaration(_) => Ok(CompletionRecord::empty()),
            ast::Statement::IfStatement(statement) => statement.evaluate(agent),
            // ReturnStatement : return Expression ;
            ast::Statement::ReturnStatement(statement) => {
                // 1. Let exprRef be ? Evaluation of Expression.
                // 2. Let exprValue be ? GetValue(exprRef).
                let value = match &statement.argument {
                    Some(argument) => argument.evaluate(agent)?,
                    // ReturnStatement : return ;
                    None => Value::Undefined,
                };
                // 4. Return Completion Record { [[Type]]: RETURN, [[Value]]: exprValue, [[Target]]: EMPTY }.
                Ok(CompletionRecord::return_completion(value))
            }
            // ThrowStatement : throw Expression ;
            ast::Statement::ThrowStatement(statement) => {
                // 1. Let exprRef be ? Evaluation of Expression.
                // 2. Let exprValue be ? GetValue(exprRef).
                let value = statement.argument.evaluate(agent)?;
                // 3. Return ThrowCompletion(exprValue).
                Err(JsError::new(value))
            }
            // BreakStatement : break ;
            // 1. Return Completion Record { [[Type]]: BREAK, [[Value]]: EMPTY, [[Target]]: EMPTY }.
            ast::Statement::BreakStatement(_) => Ok(CompletionRecord::break_completion()),
            // ContinueStatement : continue ;
            // 1. Return Completion Record { [[Type]]: CONTINUE, [[Value]]: EMPTY, [[Target]]: EMPTY }.
            ast::Statement::ContinueStatement(_) => Ok(CompletionRecord::continue_completion()),
            ast::Statement::ForStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::ForInStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::ForOfStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::WhileStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::DoWhileStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::SwitchStatement(statement) => {
                evaluate_breakable_statement(statement.evaluate(agent))
            }
            ast::Statement::TryStatement(statement) => statement.evaluate(agent),
            _ => Err(unsupported_node(agent, statement_type_name(self), self.span())),
        }
    }
}

/// ### [14.1.1 Runtime Semantics: LabelledEvaluation](https://tc39.es/ecma262/#sec-statement-semantics-runtime-semantics-labelledevaluation)
///
/// BreakableStatement : IterationStatement, SwitchStatement
fn evaluate_breakable_statement(
    statement_result: JsResult<CompletionRecord>,
) -> JsResult<CompletionRecord> {
    // 1. Let stmtResult be Completion(LoopEvaluation of IterationStatement with argument labelSet).
    let statement_result = statement_result?;
    // 2. If stmtResult is a break completion, then
    //    a. If stmtResult.[[Target]] is EMPTY, then
    //       i. If stmtResult.[[Value]] is EMPTY, set stmtResult to NormalCompletion(undefined).
    //       ii. Else, set stmtResult to NormalCompletion(stmtResult.[[Value]]).
    if statement_result.kind == CompletionType::Break {
        return Ok(CompletionRecord::normal(
            statement_result.value.unwrap_or_default(),
        ));
    }
    // 3. Return ? stmtResult.
    Ok(statement_result)
}

/// ### [14.2.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-block-runtime-semantics-evaluation)
///
/// StatementList : StatementList StatementListItem
pub(crate) fn evaluate_statement_list<'a>(
    agent: &mut Agent<'a>,
    statements: &'a [ast::Statement<'a>],
) -> JsResult<CompletionRecord> {
    let mut value = None;
    for statement in statements {
        // 1. Let sl be ? Evaluation of StatementList.
        // 2. Let s be Completion(Evaluation of StatementListItem).
        // 3. Return ? UpdateEmpty(s, sl).
        let completion = statement.evaluate(agent)?.update_empty(value.take());
        if completion.is_abrupt() {
            return Ok(completion);
        }
        value = completion.value;
    }
    Ok(CompletionRecord {
        kind: CompletionType::Normal,
        value,
    })
}

impl<'a> Evaluate<'a> for ast::BlockStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.2.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-block-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        before_evaluate(agent, AstKind::BlockStatement(self));
        // Block : { }
        // 1. Return EMPTY.
        if self.body.is_empty() {
            return Ok(CompletionRecord::empty());
        }
        // Block : { StatementList }
        // 1. Let oldEnv be the running execution context's LexicalEnvironment.
        let old_env = agent.current_lexical_environment();
        // 2. Let blockEnv be NewDeclarativeEnvironment(oldEnv).
        let block_env = new_declarative_environment(agent, Some(old_env));
        // 3. Perform BlockDeclarationInstantiation(StatementList, blockEnv).
        let scope = agent[agent.current_realm_id()].scope(self.unstable_address());
        block_declaration_instantiation(agent, &scope, block_env);
        // 4. Set the running execution context's LexicalEnvironment to blockEnv.
        agent.set_current_lexical_environment(block_env);
        // 5. Let blockValue be Completion(Evaluation of StatementList).
        let block_value = evaluate_statement_list(agent, &self.body);
        // 6. Set the running execution context's LexicalEnvironment to oldEnv.
        agent.set_current_lexical_environment(old_env);
        // 7. Return ? blockValue.
        block_value
    }
}

impl<'a> Evaluate<'a> for ast::IfStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.6.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-if-statement-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // 1. Let exprRef be ? Evaluation of Expression.
        // 2. Let exprValue be ToBoolean(? GetValue(exprRef)).
        let expr_value = to_boolean(&self.test.evaluate(agent)?);
        let branch = if expr_value { Branch::If } else { Branch::Else };
        if let Some(hooks) = agent[agent.current_realm_id()].hooks.clone() {
            hooks.before_branch(self, branch);
        }
        let statement_completion = if expr_value {
            // 3. If exprValue is true, then
            //    a. Let stmtCompletion be Completion(Evaluation of the first Statement).
            self.consequent.evaluate(agent)?
        } else if let Some(alternate) = &self.alternate {
            // 4. Else,
            //    a. Let stmtCompletion be Completion(Evaluation of the second Statement).
            alternate.evaluate(agent)?
        } else {
            // IfStatement : if ( Expression ) Statement
            // 3. If exprValue is false, then
            //    a. Return undefined.
            return Ok(CompletionRecord::normal(Value::Undefined));
        };
        // 5. Return ? UpdateEmpty(stmtCompletion, undefined).
        Ok(statement_completion.update_empty(Some(Value::Undefined)))
    }
}

impl<'a> Evaluate<'a> for ast::DoWhileStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.7.2.2 Runtime Semantics: DoWhileLoopEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-dowhileloopevaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // 1. Let V be undefined.
        let mut v = Value::Undefined;
        // 2. Repeat,
        loop {
            // a. Let stmtResult be Completion(Evaluation of Statement).
            let statement_result = self.body.evaluate(agent)?;
            // b. If LoopContinues(stmtResult, labelSet) is false, return ? UpdateEmpty(stmtResult, V).
            if !statement_result.loop_continues() {
                return Ok(statement_result.update_empty(Some(v)));
            }
            // c. If stmtResult.[[Value]] is not EMPTY, set V to stmtResult.[[Value]].
            if let Some(value) = statement_result.value {
                v = value;
            }
            // d. Let exprRef be ? Evaluation of Expression.
            // e. Let exprValue be ? GetValue(exprRef).
            // f. If ToBoolean(exprValue) is false, return V.
            if !to_boolean(&self.test.evaluate(agent)?) {
                return Ok(CompletionRecord::normal(v));
            }
        }
    }
}

impl<'a> Evaluate<'a> for ast::WhileStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.7.3.2 Runtime Semantics: WhileLoopEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-whileloopevaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // 1. Let V be undefined.
        let mut v = Value::Undefined;
        // 2. Repeat,
        loop {
            // a. Let exprRef be ? Evaluation of Expression.
            // b. Let exprValue be ? GetValue(exprRef).
            // c. If ToBoolean(exprValue) is false, return V.
            if !to_boolean(&self.test.evaluate(agent)?) {
                return Ok(CompletionRecord::normal(v));
            }
            // d. Let stmtResult be Completion(Evaluation of Statement).
            let statement_result = self.body.evaluate(agent)?;
            // e. If LoopContinues(stmtResult, labelSet) is false, return ? UpdateEmpty(stmtResult, V).
            if !statement_result.loop_continues() {
                return Ok(statement_result.update_empty(Some(v)));
            }
            // f. If stmtResult.[[Value]] is not EMPTY, set V to stmtResult.[[Value]].
            if let Some(value) = statement_result.value {
                v = value;
            }
        }
    }
}

impl<'a> Evaluate<'a> for ast::ForStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.7.4.2 Runtime Semantics: ForLoopEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-forloopevaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        let lexical_declaration = match &self.init {
            Some(ast::ForStatementInit::VariableDeclaration(declaration))
                if declaration.kind.is_lexical() =>
            {
                declaration
            }
            // ForStatement : for ( var VariableDeclarationList ; Expressionopt ; Expressionopt ) Statement
            Some(ast::ForStatementInit::VariableDeclaration(declaration)) => {
                // 1. Let varDcl be Completion(Evaluation of VariableDeclarationList).
                // 2. ReturnIfAbrupt(varDcl).
                before_evaluate(agent, AstKind::VariableDeclaration(declaration));
                declaration.evaluate(agent)?;
                // 3. Return ? ForBodyEvaluation(the first Expression, the second Expression, Statement, « », labelSet).
                return for_body_evaluation(agent, self, &[]);
            }
            // ForStatement : for ( Expressionopt ; Expressionopt ; Expressionopt ) Statement
            init => {
                // 1. If the first Expression is present, then
                //    a. Let exprRef be ? Evaluation of the first Expression.
                //    b. Perform ? GetValue(exprRef).
                if let Some(expression) = init.as_ref().and_then(|init| init.as_expression()) {
                    expression.evaluate(agent)?;
                }
                // 2. Return ? ForBodyEvaluation(the second Expression, the third Expression, Statement, « », labelSet).
                return for_body_evaluation(agent, self, &[]);
            }
        };
        // ForStatement : for ( LexicalDeclaration Expressionopt ; Expressionopt ) Statement
        // 1. Let oldEnv be the running execution context's LexicalEnvironment.
        let old_env = agent.current_lexical_environment();
        // 2. Let loopEnv be NewDeclarativeEnvironment(oldEnv).
        let loop_env = new_declarative_environment(agent, Some(old_env));
        // 3. Let isConst be IsConstantDeclaration of LexicalDeclaration.
        let is_const = lexical_declaration.kind.is_const();
        // 4. Let boundNames be the BoundNames of LexicalDeclaration.
        let mut bound_names = Vec::new();
        lexical_declaration.bound_names(&mut |identifier| bound_names.push(identifier.name.as_str()));
        // 5. For each element dn of boundNames, do
        for dn in &bound_names {
            if is_const {
                // a. If isConst is true, then
                //    i. Perform ! loopEnv.CreateImmutableBinding(dn, true).
                loop_env.create_immutable_binding(agent, dn, true);
            } else {
                // b. Else,
                //    i. Perform ! loopEnv.CreateMutableBinding(dn, false).
                loop_env.create_mutable_binding(agent, dn, false);
            }
        }
        // 6. Set the running execution context's LexicalEnvironment to loopEnv.
        agent.set_current_lexical_environment(loop_env);
        // 7. Let forDcl be Completion(Evaluation of LexicalDeclaration).
        before_evaluate(agent, AstKind::VariableDeclaration(lexical_declaration));
        let body_result = lexical_declaration.evaluate(agent).and_then(|()| {
            // 9. If isConst is false, let perIterationLets be boundNames;
            //    otherwise let perIterationLets be a new empty List.
            let per_iteration_lets: &[&str] = if is_const { &[] } else { &bound_names };
            // 10. Let bodyResult be Completion(ForBodyEvaluation(the first
            //     Expression, the second Expression, Statement,
            //     perIterationLets, labelSet)).
            for_body_evaluation(agent, self, per_iteration_lets)
        });
        // 8. If forDcl is an abrupt completion, then
        //    a. Set the running execution context's LexicalEnvironment to oldEnv.
        //    b. Return ? forDcl.
        // 11. Set the running execution context's LexicalEnvironment to oldEnv.
        agent.set_current_lexical_environment(old_env);
        // 12. Return ? bodyResult.
        body_result
    }
}

/// ### [14.7.4.3 ForBodyEvaluation ( test, increment, stmt, perIterationBindings, labelSet )](https://tc39.es/ecma262/#sec-forbodyevaluation)
fn for_body_evaluation<'a>(
    agent: &mut Agent<'a>,
    statement: &'a ast::ForStatement<'a>,
    per_iteration_bindings: &[&str],
) -> JsResult<CompletionRecord> {
    // 1. Let V be undefined.
    let mut v = Value::Undefined;
    // 2. Perform ? CreatePerIterationEnvironment(perIterationBindings).
    create_per_iteration_environment(agent, per_iteration_bindings)?;
    // 3. Repeat,
    loop {
        // a. If test is not EMPTY, then
        if let Some(test) = &statement.test {
            // i. Let testRef be ? Evaluation of test.
            // ii. Let testValue be ? GetValue(testRef).
            // iii. If ToBoolean(testValue) is false, return V.
            if !to_boolean(&test.evaluate(agent)?) {
                return Ok(CompletionRecord::normal(v));
            }
        }
        // b. Let result be Completion(Evaluation of stmt).
        let result = statement.body.evaluate(agent)?;
        // c. If LoopContinues(result, labelSet) is false, return ? UpdateEmpty(result, V).
        if !result.loop_continues() {
            return Ok(result.update_empty(Some(v)));
        }
        // d. If result.[[Value]] is not EMPTY, set V to result.[[Value]].
        if let Some(value) = result.value {
            v = value;
        }
        // e. Perform ? CreatePerIterationEnvironment(perIterationBindings).
        create_per_iteration_environment(agent, per_iteration_bindings)?;
        // f. If increment is not EMPTY, then
        if let Some(update) = &statement.update {
            // i. Let incRef be ? Evaluation of increment.
            // ii. Perform ? GetValue(incRef).
            update.evaluate(agent)?;
        }
    }
}

/// ### [14.7.4.4 CreatePerIterationEnvironment ( perIterationBindings )](https://tc39.es/ecma262/#sec-createperiterationenvironment)
fn create_per_iteration_environment(
    agent: &mut Agent,
    per_iteration_bindings: &[&str],
) -> JsResult<()> {
    // 1. If perIterationBindings has any elements, then
    if per_iteration_bindings.is_empty() {
        // 2. Return UNUSED.
        return Ok(());
    }
    // a. Let lastIterationEnv be the running execution context's LexicalEnvironment.
    let last_iteration_env = agent.current_lexical_environment();
    // b. Let outer be lastIterationEnv.[[OuterEnv]].
    let outer = last_iteration_env.outer_env(agent);
    // d. Let thisIterationEnv be NewDeclarativeEnvironment(outer).
    let this_iteration_env = new_declarative_environment(agent, outer);
    // e. For each element bn of perIterationBindings, do
    for bn in per_iteration_bindings {
        // i. Perform ! thisIterationEnv.CreateMutableBinding(bn, false).
        this_iteration_env.create_mutable_binding(agent, bn, false);
        // ii. Let lastValue be ? lastIterationEnv.GetBindingValue(bn, true).
        let last_value = last_iteration_env.get_binding_value(agent, bn, true)?;
        // iii. Perform ! thisIterationEnv.InitializeBinding(bn, lastValue).
        this_iteration_env.initialize_binding(agent, bn, last_value);
    }
    // f. Set the running execution context's LexicalEnvironment to thisIterationEnv.
    agent.set_current_lexical_environment(this_iteration_env);
    Ok(())
}

impl<'a> Evaluate<'a> for ast::SwitchStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.12.4 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-switch-statement-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // 1. Let exprRef be ? Evaluation of Expression.
        // 2. Let switchValue be ? GetValue(exprRef).
        let switch_value = self.discriminant.evaluate(agent)?;
        // 3. Let oldEnv be the running execution context's LexicalEnvironment.
        let old_env = agent.current_lexical_environment();
        // 4. Let blockEnv be NewDeclarativeEnvironment(oldEnv).
        let block_env = new_declarative_environment(agent, Some(old_env));
        // 5. Perform BlockDeclarationInstantiation(CaseBlock, blockEnv).
        let scope = agent[agent.current_realm_id()].scope(self.unstable_address());
        block_declaration_instantiation(agent, &scope, block_env);
        // 6. Set the running execution context's LexicalEnvironment to blockEnv.
        agent.set_current_lexical_environment(block_env);
        // 7. Let R be Completion(CaseBlockEvaluation of CaseBlock with argument switchValue).
        let r = case_block_evaluation(agent, &self.cases, &switch_value);
        // 8. Set the running execution context's LexicalEnvironment to oldEnv.
        agent.set_current_lexical_environment(old_env);
        // 9. Return R.
        r
    }
}

/// ### [14.12.2 Runtime Semantics: CaseBlockEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-caseblockevaluation)
fn case_block_evaluation<'a>(
    agent: &mut Agent<'a>,
    cases: &'a [ast::SwitchCase<'a>],
    input: &Value,
) -> JsResult<CompletionRecord> {
    // 1. Let V be undefined.
    let mut v = Value::Undefined;
    let default_index = cases.iter().position(|case| case.is_default_case());
    // 2. Let A be the List of CaseClause items in the first CaseClauses, in source text order.
    // 5. Let B be the List of CaseClause items in the second CaseClauses, in source text order.
    let (a, b) = match default_index {
        Some(index) => (&cases[..index], &cases[index + 1..]),
        None => (cases, &cases[cases.len()..]),
    };
    // 3. Let found be false.
    let mut found = false;
    // 4. For each CaseClause C of A, do
    for c in a {
        // a. If found is false, then
        //    i. Set found to ? CaseClauseIsSelected(C, input).
        if !found {
            found = case_clause_is_selected(agent, c, input)?;
        }
        // b. If found is true, then
        if found {
            if let Some(completion) = evaluate_case_clause(agent, c, &mut v)? {
                return Ok(completion);
            }
        }
    }
    let Some(default_index) = default_index else {
        // CaseBlock : { CaseClauses }
        // 5. Return V.
        return Ok(CompletionRecord::normal(v));
    };
    // 6. Let foundInB be false.
    let mut found_in_b = false;
    // 7. If found is false, then
    if !found {
        // a. For each CaseClause C of B, do
        for c in b {
            // i. If foundInB is false, then
            //    1. Set foundInB to ? CaseClauseIsSelected(C, input).
            if !found_in_b {
                found_in_b = case_clause_is_selected(agent, c, input)?;
            }
            // ii. If foundInB is true, then
            if found_in_b {
                if let Some(completion) = evaluate_case_clause(agent, c, &mut v)? {
                    return Ok(completion);
                }
            }
        }
    }
    // 8. If foundInB is true, return V.
    if found_in_b {
        return Ok(CompletionRecord::normal(v));
    }
    // 9. Let defaultR be Completion(Evaluation of DefaultClause).
    // 10. If defaultR.[[Value]] is not EMPTY, set V to defaultR.[[Value]].
    // 11. If defaultR is an abrupt completion, return ? UpdateEmpty(defaultR, V).
    if let Some(completion) = evaluate_case_clause(agent, &cases[default_index], &mut v)? {
        return Ok(completion);
    }
    // 12. NOTE: The following is another complete iteration of the second CaseClauses.
    // 13. For each CaseClause C of B, do
    for c in b {
        if let Some(completion) = evaluate_case_clause(agent, c, &mut v)? {
            return Ok(completion);
        }
    }
    // 14. Return V.
    Ok(CompletionRecord::normal(v))
}

/// Evaluates the statements of a clause, folding its value into `v`.
/// Returns the completion to leave the case block with, if it is abrupt.
fn evaluate_case_clause<'a>(
    agent: &mut Agent<'a>,
    clause: &'a ast::SwitchCase<'a>,
    v: &mut Value,
) -> JsResult<Option<CompletionRecord>> {
    // 1. Let R be Completion(Evaluation of C).
    let r = evaluate_statement_list(agent, &clause.consequent)?;
    // 2. If R.[[Value]] is not EMPTY, set V to R.[[Value]].
    if let Some(value) = &r.value {
        *v = value.clone();
    }
    // 3. If R is an abrupt completion, return ? UpdateEmpty(R, V).
    if r.is_abrupt() {
        return Ok(Some(r.update_empty(Some(v.clone()))));
    }
    Ok(None)
}

/// ### [14.12.3 CaseClauseIsSelected ( C, input )](https://tc39.es/ecma262/#sec-runtime-semantics-caseclauseisselected)
fn case_clause_is_selected<'a>(
    agent: &mut Agent<'a>,
    clause: &'a ast::SwitchCase<'a>,
    input: &Value,
) -> JsResult<bool> {
    let Some(test) = &clause.test else {
        unreachable!("the default clause is never tested")
    };
    // 2. Let exprRef be ? Evaluation of the Expression of C.
    // 3. Let clauseSelector be ? GetValue(exprRef).
    let clause_selector = test.evaluate(agent)?;
    // 4. Return IsStrictlyEqual(input, clauseSelector).
    Ok(is_strictly_equal(input, &clause_selector))
}

impl<'a> Evaluate<'a> for ast::TryStatement<'a> {
    type Output = CompletionRecord;

    /// ### [14.15.3 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-try-statement-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<CompletionRecord> {
        // 1. Let B be Completion(Evaluation of Block).
        let b = self.block.evaluate(agent);
        // TryStatement : try Block Catch
        // 2. If B is a throw completion, let C be Completion(CatchClauseEvaluation of Catch with argument B.[[Value]]).
        // 3. Else, let C be B.
        let c = match (b, &self.handler) {
            (Err(thrown), Some(handler)) => {
                catch_clause_evaluation(agent, handler, thrown.into_value())
            }
            (b, _) => b,
        };
        // TryStatement : try Block Finally
        // TryStatement : try Block Catch Finally
        let completion = match &self.finalizer {
            Some(finalizer) => {
                // 4. Let F be Completion(Evaluation of Finally).
                let f = finalizer.evaluate(agent)?;
                // 5. If F is a normal completion, set F to C.
                if f.is_abrupt() { f } else { c? }
            }
            None => c?,
        };
        // 6. Return ? UpdateEmpty(F, undefined).
        Ok(completion.update_empty(Some(Value::Undefined)))
    }
}

/// ### [14.15.2 Runtime Semantics: CatchClauseEvaluation](https://tc39.es/ecma262/#sec-runtime-semantics-catchclauseevaluation)
fn catch_clause_evaluation<'a>(
    agent: &mut Agent<'a>,
    clause: &'a ast::CatchClause<'a>,
    thrown_value: Value,
) -> JsResult<CompletionRecord> {
    before_evaluate(agent, AstKind::CatchClause(clause));
    // Catch : catch Block
    // 1. Return ? Evaluation of Block.
    let Some(parameter) = &clause.param else {
        return clause.body.evaluate(agent);
    };
    // Catch : catch ( CatchParameter ) Block
    // 1. Let oldEnv be the running execution context's LexicalEnvironment.
    let old_env = agent.current_lexical_environment();
    // 2. Let catchEnv be NewDeclarativeEnvironment(oldEnv).
    let catch_env = new_declarative_environment(agent, Some(old_env));
    // 3. For each element argName of the BoundNames of CatchParameter, do
    //    a. Perform ! catchEnv.CreateMutableBinding(argName, false).
    parameter.pattern.bound_names(&mut |identifier| {
        catch_env.create_mutable_binding(agent, &identifier.name, false);
    });
    // 4. Set the running execution context's LexicalEnvironment to catchEnv.
    agent.set_current_lexical_environment(catch_env);
    // 5. Let status be Completion(BindingInitialization of CatchParameter with arguments thrownValue and catchEnv).
    let status = binding_initialization(agent, &parameter.pattern, thrown_value, Some(catch_env));
    // 6. If status is an abrupt completion, then
    //    a. Set the running execution context's LexicalEnvironment to oldEnv.
    //    b. Return ? status.
    // 7. Let B be Completion(Evaluation of Block).
    let b = status.and_then(|()| clause.body.evaluate(agent));
    // 8. Set the running execution context's LexicalEnvironment to oldEnv.
    agent.set_current_lexical_environment(old_env);
    // 9. Return ? B.
    b
}
