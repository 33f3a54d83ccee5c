use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// Error conditions raised while compiling rule sets.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("invalid pattern '{pattern}' in rule set '{rule_set}': {source}")]
    InvalidPattern {
        rule_set: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Ordered list of case-insensitive patterns describing one category of
/// suspicious content. A line belongs to the category when any pattern
/// matches; pattern order carries no precedence.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: String,
    rules: Vec<Regex>,
}

impl RuleSet {
    /// Compiles the given patterns into a rule set. Every pattern is matched
    /// case-insensitively (Unicode case folding included, so Cyrillic
    /// patterns behave the same as Latin ones).
    pub fn compile(
        name: impl Into<String>,
        patterns: &[&str],
    ) -> Result<Self, ClassifyError> {
        let name = name.into();
        let mut rules = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let rule = RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .map_err(|source| ClassifyError::InvalidPattern {
                    rule_set: name.clone(),
                    pattern: (*pattern).to_string(),
                    source,
                })?;
            rules.push(rule);
        }
        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns true when any rule matches the line.
    pub fn matches(&self, line: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(line))
    }
}

/// Promotional/boilerplate phrases in the source language (English): channel
/// plugs, donation links, social-media handles, bare URLs and e-mail
/// addresses.
const SOURCE_SPAM_PATTERNS: &[&str] = &[
    r"subscribe|follow\s+.*\s+(channel|page|account)",
    r"read|join\s+us\s+at",
    r"discord\s+server|telegram|whatsapp\s+group",
    r"support\s+us\s+on\s+(patreon|ko-fi|paypal)",
    r"click|link\s+here|download\s+app|visit\s+(site|store)",
    r"promo\s+code|sponsored|affiliate\s+link",
    r"donate|tip|monetization",
    r"\bad\b|announcement|advertisement",
    r"follow\s+us\s+on\s+(facebook|instagram|tiktok|youtube)",
    r"exclusive|bonus\s+content\s+for\s+subscribers",
    r"rate|review|share\s+this\s+(chapter|book)",
    r"turn\s+on\s+notifications|stay\s+tuned",
    r"limited\s+offer|early\s+access|paid\s+chapters",
    r"commercial\s+break|check\s+out",
    r"@\w+|https?://|www\.|\.com|\.org|\.net",
    r"#\w+|[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}",
];

/// The same categories in the target language (Russian): subscription pleas,
/// payment services, marketplace and social-network names, phone numbers.
const TARGET_SPAM_PATTERNS: &[&str] = &[
    r"подписывайтесь|подписаться|подпишись|подпишитесь|подписка",
    r"читайте нас|присоединяйтесь к нам|найдите нас",
    r"discord[- ]сервер|вайбер|viber|whatsapp|телеграм|telegram|vk|вконтакте|одноклассники",
    r"поддержите автора|поддержка автора|поддержать нас",
    r"юmoney|patreon|donationalerts|сбербанк|тинькофф",
    r"ссылка для доступа|скачать приложение|перейти по ссылке",
    r"промокод|рекламное предложение|партнерская программа",
    r"донаты|пожертвования|купите кофе автору",
    r"эксклюзивный контент|для подписчиков",
    r"рейтинг книги|оставьте отзыв|litres|амазон|amazon",
    r"включите уведомления|не пропустите обновления",
    r"ранний доступ|платные главы|доступ за деньги",
    r"рекламная пауза|спонсорский блок|партнерский материал",
    r"извините за рекламу|это не часть сюжета",
    r"vk\.com|t\.me|mail\.ru",
    r"#[а-яА-Яa-zA-Z0-9_]+",
    r"tiktok|youtube|rutube|zen|яндекс",
    r"ozon|wildberries|twitch",
    r"перевод от команды|переведено для",
    r"автор просит поддержать|главы выходят быстрее",
    r"переходите по ссылке|акция только для|первых \d+ читателей",
    r"отключите блокировщик|реклама помогает",
    r"planeta\.ru|boomstarter|краудфандинг",
    r"[a-z]+\.[a-z]{2,3}",
    r"\+7[0-9]{10}|8[0-9]{10}",
    r"vpn|torrent|пиратск",
    r"ищите нас в соцсетях",
];

static SOURCE_SPAM: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile("source-spam", SOURCE_SPAM_PATTERNS)
        .expect("built-in source-spam rules must compile")
});

static TARGET_SPAM: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::compile("target-spam", TARGET_SPAM_PATTERNS)
        .expect("built-in target-spam rules must compile")
});

pub mod builtin {
    use super::*;

    /// Built-in rule set for source-language (English) promotional content.
    pub fn source_spam() -> RuleSet {
        SOURCE_SPAM.clone()
    }

    /// Built-in rule set for target-language (Russian) promotional content.
    pub fn target_spam() -> RuleSet {
        TARGET_SPAM.clone()
    }
}
