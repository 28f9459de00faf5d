//! Supported languages and their message catalogs.
//!
//! Every language maps to a fixed `Messages` record, so a missing
//! translation is a compile error rather than a lookup miss.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh-HK")]
    Cantonese,
    #[serde(rename = "zh-TW")]
    TraditionalChinese,
    #[serde(rename = "zh-CN")]
    SimplifiedChinese,
    #[serde(rename = "ja")]
    Japanese,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unsupported language code: {0}")]
pub struct UnknownLanguage(pub String);

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Cantonese,
        Language::TraditionalChinese,
        Language::SimplifiedChinese,
        Language::Japanese,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Cantonese => "zh-HK",
            Language::TraditionalChinese => "zh-TW",
            Language::SimplifiedChinese => "zh-CN",
            Language::Japanese => "ja",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Cantonese => "廣東話 (香港)",
            Language::TraditionalChinese => "繁體中文 (台灣)",
            Language::SimplifiedChinese => "简体中文",
            Language::Japanese => "日本語",
        }
    }

    /// Instruction appended to the generation prompt.
    pub fn response_instruction(self) -> &'static str {
        match self {
            Language::English => "Respond in English.",
            Language::Cantonese => {
                "Respond in Traditional Chinese (Hong Kong Cantonese colloquial style where appropriate for '今日食乜餸')."
            }
            Language::TraditionalChinese => "Respond in Traditional Chinese (Taiwan style).",
            Language::SimplifiedChinese => "Respond in Simplified Chinese.",
            Language::Japanese => "Respond in Japanese.",
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Language::English => &EN,
            Language::Cantonese => &ZH_HK,
            Language::TraditionalChinese => &ZH_TW,
            Language::SimplifiedChinese => &ZH_CN,
            Language::Japanese => &JA,
        }
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code.trim()))
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// User-facing strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub app_title: &'static str,
    pub generating: &'static str,
    pub no_results: &'static str,
    pub added_to_favorites: &'static str,
    pub removed_from_favorites: &'static str,
    pub schedule_saved: &'static str,
    pub history_empty: &'static str,
    pub favorites_empty: &'static str,
    pub calendar_empty: &'static str,
    pub ingredients: &'static str,
    pub instructions: &'static str,
    pub minutes: &'static str,
    pub any: &'static str,
    pub recipe_count: &'static str,
    pub creativity: &'static str,
    /// `{title}` is replaced with the recipe title.
    pub share_text: &'static str,
}

impl Messages {
    pub fn share_text_for(&self, title: &str, ingredients: &[String]) -> String {
        format!(
            "{}\n\n{}: {}",
            self.share_text.replace("{title}", title),
            self.ingredients,
            ingredients.join(", ")
        )
    }
}

static EN: Messages = Messages {
    app_title: "Pantry Chef",
    generating: "Cooking up ideas...",
    no_results: "No recipes this time. Try again or tweak your filters.",
    added_to_favorites: "Added to favorites",
    removed_from_favorites: "Removed from favorites",
    schedule_saved: "Recipe added to your meal plan",
    history_empty: "No searches yet.",
    favorites_empty: "No favorites yet.",
    calendar_empty: "Nothing planned this month.",
    ingredients: "Ingredients",
    instructions: "Instructions",
    minutes: "min",
    any: "Any",
    recipe_count: "recipes",
    creativity: "Creativity",
    share_text: "Check out this recipe: {title}",
};

static ZH_HK: Messages = Messages {
    app_title: "今日食乜餸",
    generating: "諗緊食乜…",
    no_results: "今次搵唔到食譜，試多次或者改吓篩選啦。",
    added_to_favorites: "已加入最愛",
    removed_from_favorites: "已從最愛移除",
    schedule_saved: "已加入餐單",
    history_empty: "未有搜尋紀錄。",
    favorites_empty: "未有最愛食譜。",
    calendar_empty: "呢個月未有安排。",
    ingredients: "材料",
    instructions: "做法",
    minutes: "分鐘",
    any: "任何",
    recipe_count: "個食譜",
    creativity: "創意",
    share_text: "睇吓呢個食譜：{title}",
};

static ZH_TW: Messages = Messages {
    app_title: "今天吃什麼",
    generating: "正在構思料理…",
    no_results: "這次沒有找到食譜，請再試一次或調整篩選條件。",
    added_to_favorites: "已加入收藏",
    removed_from_favorites: "已從收藏移除",
    schedule_saved: "已加入餐點計畫",
    history_empty: "尚無搜尋紀錄。",
    favorites_empty: "尚無收藏的食譜。",
    calendar_empty: "本月尚無安排。",
    ingredients: "食材",
    instructions: "步驟",
    minutes: "分鐘",
    any: "不限",
    recipe_count: "道食譜",
    creativity: "創意",
    share_text: "來看看這道食譜：{title}",
};

static ZH_CN: Messages = Messages {
    app_title: "今天吃什么",
    generating: "正在构思菜谱…",
    no_results: "这次没有找到菜谱，请再试一次或调整筛选条件。",
    added_to_favorites: "已加入收藏",
    removed_from_favorites: "已从收藏移除",
    schedule_saved: "已加入膳食计划",
    history_empty: "暂无搜索记录。",
    favorites_empty: "暂无收藏的菜谱。",
    calendar_empty: "本月暂无安排。",
    ingredients: "食材",
    instructions: "步骤",
    minutes: "分钟",
    any: "不限",
    recipe_count: "道菜谱",
    creativity: "创意",
    share_text: "来看看这道菜谱：{title}",
};

static JA: Messages = Messages {
    app_title: "今日のごはん",
    generating: "レシピを考えています…",
    no_results: "レシピが見つかりませんでした。もう一度試すか、条件を変えてください。",
    added_to_favorites: "お気に入りに追加しました",
    removed_from_favorites: "お気に入りから削除しました",
    schedule_saved: "献立に追加しました",
    history_empty: "検索履歴はまだありません。",
    favorites_empty: "お気に入りはまだありません。",
    calendar_empty: "今月の予定はありません。",
    ingredients: "材料",
    instructions: "作り方",
    minutes: "分",
    any: "指定なし",
    recipe_count: "件のレシピ",
    creativity: "創造性",
    share_text: "このレシピをチェック：{title}",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_str() {
        for lang in Language::ALL {
            assert_eq!(lang.code().parse::<Language>(), Ok(lang));
        }
        assert_eq!("ZH-hk".parse::<Language>(), Ok(Language::Cantonese));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_each_language_has_distinct_instruction() {
        let mut seen: Vec<&str> = Language::ALL.iter().map(|l| l.response_instruction()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), Language::ALL.len());
        assert!(Language::Cantonese.response_instruction().contains("colloquial"));
    }

    #[test]
    fn test_share_text_fills_title() {
        let text = Language::English
            .messages()
            .share_text_for("Egg Fried Rice", &["egg".to_string(), "rice".to_string()]);
        assert_eq!(text, "Check out this recipe: Egg Fried Rice\n\nIngredients: egg, rice");
    }

    #[test]
    fn test_language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Cantonese).unwrap(), "\"zh-HK\"");
    }
}
