//! Purpose: Localized status texts for CLI output.
//! Exports: `Lang`, `MessageKey`, `Messages`.
//! Role: Explicit catalog passed to rendering code; replaces ambient language state.
//! Invariants: Every key resolves in every language; no runtime lookup failures.

use clap::ValueEnum;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Lang {
    En,
    Zh,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageKey {
    ParseEscapesDone,
    UnescapeDone,
    UnwrapDone,
    RepairDone,
    EmptyInput,
    ModuleError,
}

/// Message catalog for one language. Constructed once per invocation and
/// passed down explicitly; there is no process-wide language state.
#[derive(Copy, Clone, Debug)]
pub struct Messages {
    lang: Lang,
}

impl Messages {
    pub fn new(lang: Lang) -> Self {
        Self { lang }
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        match self.lang {
            Lang::En => match key {
                MessageKey::ParseEscapesDone => "Escape sequences parsed.",
                MessageKey::UnescapeDone => "Escape characters processed.",
                MessageKey::UnwrapDone => "Advanced unescape complete.",
                MessageKey::RepairDone => "JSON repaired successfully!",
                MessageKey::EmptyInput => "Please enter some JSON to process.",
                MessageKey::ModuleError => "Repair module reported an error",
            },
            Lang::Zh => match key {
                MessageKey::ParseEscapesDone => "转义序列解析完成!",
                MessageKey::UnescapeDone => "转义字符处理完成!",
                MessageKey::UnwrapDone => "高级转义处理完成!",
                MessageKey::RepairDone => "JSON 修复成功!",
                MessageKey::EmptyInput => "请先输入一些内容。",
                MessageKey::ModuleError => "修复模块返回错误",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Lang, MessageKey, Messages};

    const ALL_KEYS: [MessageKey; 6] = [
        MessageKey::ParseEscapesDone,
        MessageKey::UnescapeDone,
        MessageKey::UnwrapDone,
        MessageKey::RepairDone,
        MessageKey::EmptyInput,
        MessageKey::ModuleError,
    ];

    #[test]
    fn every_key_resolves_in_every_language() {
        for lang in [Lang::En, Lang::Zh] {
            let messages = Messages::new(lang);
            for key in ALL_KEYS {
                assert!(!messages.get(key).is_empty());
            }
        }
    }

    #[test]
    fn languages_differ() {
        let en = Messages::new(Lang::En);
        let zh = Messages::new(Lang::Zh);
        assert_ne!(en.get(MessageKey::RepairDone), zh.get(MessageKey::RepairDone));
    }
}
