// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! ### [13.15 Assignment Operators](https://tc39.es/ecma262/#sec-assignment-operators)

mod destructuring_assignment;

pub(crate) use destructuring_assignment::assign_to_target;

use oxc_ast::ast;
use oxc_syntax::operator::AssignmentOperator;

use self::destructuring_assignment::destructuring_assignment_evaluation;
use super::{
    Evaluate, EvaluateReference, apply_string_or_numeric_binary_operator,
    is_supported_binary_operator,
};
use crate::ecmascript::{
    abstract_operations::type_conversion::to_boolean,
    execution::{Agent, ExceptionType, JsResult},
    syntax_directed_operations::function_definitions::{
        is_anonymous_function_definition, named_evaluation,
    },
    types::{Value, get_value, put_value},
};

impl<'a> Evaluate<'a> for ast::AssignmentExpression<'a> {
    type Output = Value;

    /// ### [13.15.2 Runtime Semantics: Evaluation](https://tc39.es/ecma262/#sec-assignment-operators-runtime-semantics-evaluation)
    fn evaluate(&'a self, agent: &mut Agent<'a>) -> JsResult<Value> {
        if let Some(operator) = self.operator.to_binary_operator() {
            if !is_supported_binary_operator(operator) {
                return Err(agent.throw_exception(
                    ExceptionType::SyntaxError,
                    format!("Unsupported assignment operator `{}`", self.operator.as_str()),
                ));
            }
        }

        let Some(target) = self.left.as_simple_assignment_target() else {
            // AssignmentExpression : LeftHandSideExpression = AssignmentExpression
            // 2. Let assignmentPattern be the AssignmentPattern that is
            //    covered by LeftHandSideExpression.
            let Some(pattern) = self.left.as_assignment_target_pattern() else {
                unreachable!("assignment target is simple or a pattern")
            };
            // 3. Let rRef be ? Evaluation of AssignmentExpression.
            // 4. Let rVal be ? GetValue(rRef).
            let r_val = self.right.evaluate(agent)?;
            // 5. Perform ? DestructuringAssignmentEvaluation of
            //    assignmentPattern with argument rVal.
            destructuring_assignment_evaluation(agent, pattern, r_val.clone())?;
            // 6. Return rVal.
            return Ok(r_val);
        };

        // 1. Let lref be ? Evaluation of LeftHandSideExpression.
        let lref = target.evaluate_reference(agent)?;
        let binding_name = match target {
            ast::SimpleAssignmentTarget::AssignmentTargetIdentifier(identifier) => {
                Some(identifier.name.as_str())
            }
            _ => None,
        };

        let r_val = match self.operator {
            AssignmentOperator::Assign => {
                // 1.c. If IsAnonymousFunctionDefinition(AssignmentExpression) and
                //      IsIdentifierRef of LeftHandSideExpression are both true, then
                //      i. Let lhs be the StringValue of LeftHandSideExpression.
                //      ii. Let rval be ? NamedEvaluation of AssignmentExpression with argument lhs.
                // 1.d. Else,
                //      i. Let rref be ? Evaluation of AssignmentExpression.
                //      ii. Let rval be ? GetValue(rref).
                evaluate_named(agent, &self.right, binding_name)?
            }
            _ => {
                // 2. Let lval be ? GetValue(lref).
                let l_val = get_value(agent, &lref)?;
                match self.operator.to_binary_operator() {
                    None => {
                        // AssignmentExpression : LeftHandSideExpression &&= AssignmentExpression
                        // 3. Let lbool be ToBoolean(lval).
                        // 4. If lbool is false, return lval.
                        // AssignmentExpression : LeftHandSideExpression ||= AssignmentExpression
                        // 4. If lbool is true, return lval.
                        // AssignmentExpression : LeftHandSideExpression ??= AssignmentExpression
                        // 3. If lval is neither undefined nor null, return lval.
                        let short_circuit = match self.operator {
                            AssignmentOperator::LogicalAnd => !to_boolean(&l_val),
                            AssignmentOperator::LogicalOr => to_boolean(&l_val),
                            AssignmentOperator::LogicalNullish => !l_val.is_nullish(),
                            _ => unreachable!("logical assignment operator expected"),
                        };
                        if short_circuit {
                            return Ok(l_val);
                        }
                        // 5. If IsAnonymousFunctionDefinition(AssignmentExpression) is true
                        //    and IsIdentifierRef of LeftHandSideExpression is true, then
                        //    b. Let rval be ? NamedEvaluation of AssignmentExpression with argument lhs.
                        evaluate_named(agent, &self.right, binding_name)?
                    }
                    Some(op_text) => {
                        // AssignmentExpression : LeftHandSideExpression AssignmentOperator AssignmentExpression
                        // 3. Let rref be ? Evaluation of AssignmentExpression.
                        // 4. Let rval be ? GetValue(rref).
                        let r_val = self.right.evaluate(agent)?;
                        // 5. Let assignmentOpText be the source text matched by AssignmentOperator.
                        // 6. Let opText be the sequence of Unicode code points associated
                        //    with assignmentOpText in the following table:
                        // 7. Let r be ? ApplyStringOrNumericBinaryOperator(lval, opText, rval).
                        apply_string_or_numeric_binary_operator(agent, &l_val, op_text, &r_val)?
                    }
                }
            }
        };
        // 8. Perform ? PutValue(lref, r).
        put_value(agent, &lref, r_val.clone())?;
        // 9. Return r.
        Ok(r_val)
    }
}

fn evaluate_named<'a>(
    agent: &mut Agent<'a>,
    expression: &'a ast::Expression<'a>,
    binding_name: Option<&str>,
) -> JsResult<Value> {
    match binding_name {
        Some(name) if is_anonymous_function_definition(expression) => {
            named_evaluation(agent, expression, name)
        }
        _ => expression.evaluate(agent),
    }
}
