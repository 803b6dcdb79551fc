//! Keyword rules mapping receipt text to a spending category.
//!
//! Deterministic substring rules cover the common Taiwanese chains and
//! generic bilingual vocabulary; no model needed for the default path.

use crate::models::receipt::Category;

/// Ordered rule table. Evaluation stops at the first category whose
/// keyword set has a substring match, so the order is the priority.
pub const CATEGORY_RULES: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &[
            "餐廳",
            "restaurant",
            "cafe",
            "coffee",
            "食堂",
            "buffet",
            "麥當勞",
            "肯德基",
            "星巴克",
            "starbucks",
            "便當",
            "小吃",
            "飲料",
            "茶",
            "飯店",
        ],
    ),
    (
        Category::Grocery,
        &[
            "超市",
            "超商",
            "7-11",
            "7-eleven",
            "全家",
            "萊爾富",
            "ok mart",
            "家樂福",
            "好市多",
            "costco",
            "全聯",
            "便利商店",
        ],
    ),
    (
        Category::Transport,
        &[
            "uber", "計程車", "taxi", "捷運", "高鐵", "台鐵", "公車", "停車", "車隊",
        ],
    ),
    (
        Category::Shopping,
        &[
            "百貨", "商場", "mall", "outlet", "購物", "服飾", "鞋", "包",
        ],
    ),
    (
        Category::Entertainment,
        &["電影", "cinema", "ktv", "遊樂", "健身", "spa", "按摩"],
    ),
    (
        Category::Medical,
        &["醫院", "診所", "藥局", "pharmacy", "健保"],
    ),
];

/// Rule-based spending-category classifier.
pub struct CategoryClassifier;

impl CategoryClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Map a merchant name and raw receipt text to exactly one
    /// category.
    ///
    /// Matching is pure substring containment over the lowercased
    /// combined input, not tokenized matching: a keyword inside a
    /// longer unrelated word still counts. That is the documented
    /// behavior of the rule set, not an accident.
    pub fn classify(&self, merchant_name: &str, raw_text: &str) -> Category {
        let haystack = format!("{merchant_name} {raw_text}").to_lowercase();

        for (category, keywords) in CATEGORY_RULES {
            if keywords.iter().any(|keyword| haystack.contains(keyword)) {
                return *category;
            }
        }

        Category::Other
    }
}

impl Default for CategoryClassifier {
    fn default() -> Self {
        Self::new()
    }
}
