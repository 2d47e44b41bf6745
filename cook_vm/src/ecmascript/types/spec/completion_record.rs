// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::ecmascript::types::Value;

/// ### [6.2.4 The Completion Record Specification Type](https://tc39.es/ecma262/#sec-completion-record-specification-type)
///
/// Throw completions are not represented here: they travel as the `Err`
/// side of a [`JsResult`](crate::ecmascript::execution::JsResult).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CompletionType {
    Normal,
    Break,
    Continue,
    Return,
}

#[derive(Debug, Clone)]
pub(crate) struct CompletionRecord {
    pub(crate) kind: CompletionType,
    /// `None` is ECMA-262's ~empty~.
    pub(crate) value: Option<Value>,
}

impl CompletionRecord {
    /// ### [6.2.4.1 NormalCompletion ( value )](https://tc39.es/ecma262/#sec-normalcompletion)
    pub(crate) fn normal(value: Value) -> Self {
        Self {
            kind: CompletionType::Normal,
            value: Some(value),
        }
    }

    pub(crate) fn empty() -> Self {
        Self {
            kind: CompletionType::Normal,
            value: None,
        }
    }

    pub(crate) fn break_completion() -> Self {
        Self {
            kind: CompletionType::Break,
            value: None,
        }
    }

    pub(crate) fn continue_completion() -> Self {
        Self {
            kind: CompletionType::Continue,
            value: None,
        }
    }

    pub(crate) fn return_completion(value: Value) -> Self {
        Self {
            kind: CompletionType::Return,
            value: Some(value),
        }
    }

    pub(crate) fn is_abrupt(&self) -> bool {
        self.kind != CompletionType::Normal
    }

    /// ### [6.2.4.6 UpdateEmpty ( completionRecord, value )](https://tc39.es/ecma262/#sec-updateempty)
    pub(crate) fn update_empty(mut self, value: Option<Value>) -> Self {
        // 1. Assert: If completionRecord is either a return completion or a
        //    throw completion, then completionRecord.[[Value]] is not empty.
        debug_assert!(self.kind != CompletionType::Return || self.value.is_some());
        // 2. If completionRecord.[[Value]] is not empty, return ? completionRecord.
        // 3. Return Completion Record { [[Type]]: completionRecord.[[Type]], [[Value]]: value, [[Target]]: completionRecord.[[Target]] }.
        if self.value.is_none() {
            self.value = value;
        }
        self
    }

    /// ### [14.7.1.1 LoopContinues ( completion, labelSet )](https://tc39.es/ecma262/#sec-loopcontinues)
    pub(crate) fn loop_continues(&self) -> bool {
        // 1. If completion is a normal completion, return true.
        // 2. If completion is not a continue completion, return false.
        // 3. If completion.[[Target]] is empty, return true.
        matches!(self.kind, CompletionType::Normal | CompletionType::Continue)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn update_empty_only_fills_empty_values() {
        let filled = CompletionRecord::empty().update_empty(Some(Value::from(1)));
        assert_eq!(filled.value, Some(Value::from(1)));
        let kept = CompletionRecord::normal(Value::from("a")).update_empty(Some(Value::from(1)));
        assert_eq!(kept.value, Some(Value::from("a")));
        let broken = CompletionRecord::break_completion().update_empty(None);
        assert_eq!(broken.kind, CompletionType::Break);
        assert!(broken.value.is_none());
    }

    #[test]
    fn loops_continue_on_normal_and_continue_completions() {
        assert!(CompletionRecord::empty().loop_continues());
        assert!(CompletionRecord::continue_completion().loop_continues());
        assert!(!CompletionRecord::break_completion().loop_continues());
        assert!(!CompletionRecord::return_completion(Value::Undefined).loop_continues());
    }
}
