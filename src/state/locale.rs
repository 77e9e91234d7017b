use std::collections::HashMap;
use std::sync::LazyLock;

use crate::storage::{KeyValueStore, LANGUAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub(crate) enum Language {
    #[default]
    English,
    Urdu,
}

impl Language {
    pub(crate) fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
        }
    }

    pub(crate) fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "english" => Some(Language::English),
            "ur" | "urdu" => Some(Language::Urdu),
            _ => None,
        }
    }

    pub(crate) fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Urdu => "اردو",
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            Language::English => Language::Urdu,
            Language::Urdu => Language::English,
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("settings", "Settings"),
    ("preferences", "Preferences"),
    ("currency", "Currency"),
    ("language", "Language"),
    ("darkMode", "Dark Mode"),
    ("categories", "Expense Categories"),
    ("addNew", "Add New"),
    ("categoryName", "Category Name"),
    ("cancel", "Cancel"),
    ("selectCurrency", "Select Currency"),
    ("selectLanguage", "Select Language"),
    ("addCategory", "Add Category"),
    ("customizePreferences", "Customize your app preferences"),
    ("home", "Home"),
    ("budget", "Budget"),
    ("data", "Data"),
    ("totalBudget", "Total Budget"),
    ("spent", "Spent"),
    ("remaining", "Remaining"),
    ("used", "Used"),
    ("recentTransactions", "Recent Transactions"),
    ("noTransactions", "No transactions"),
    ("spendingByCategory", "Spending by Category"),
    ("spendingTrend", "Spending Trend"),
    ("budgetUsage", "Budget Usage"),
    ("resetAll", "Reset All Data"),
    ("on", "On"),
    ("off", "Off"),
];

const UR: &[(&str, &str)] = &[
    ("settings", "ترتیبات"),
    ("preferences", "ترجیحات"),
    ("currency", "کرنسی"),
    ("language", "زبان"),
    ("darkMode", "ڈارک موڈ"),
    ("categories", "اخراجات کی اقسام"),
    ("addNew", "نیا شامل کریں"),
    ("categoryName", "قسم کا نام"),
    ("cancel", "منسوخ کریں"),
    ("selectCurrency", "کرنسی منتخب کریں"),
    ("selectLanguage", "زبان منتخب کریں"),
    ("addCategory", "قسم شامل کریں"),
    ("customizePreferences", "اپنی ایپ کی ترجیحات کو اپنی مرضی کے مطابق بنائیں"),
    ("budget", "بجٹ"),
    ("spent", "خرچ"),
    ("remaining", "باقی"),
];

static TABLES: LazyLock<HashMap<Language, HashMap<&'static str, &'static str>>> =
    LazyLock::new(|| {
        HashMap::from([
            (Language::English, EN.iter().copied().collect()),
            (Language::Urdu, UR.iter().copied().collect()),
        ])
    });

#[derive(Debug, Clone, Default)]
pub(crate) struct LocaleState {
    language: Language,
}

impl LocaleState {
    pub(crate) fn load(store: &dyn KeyValueStore) -> Self {
        let language = match store.get(LANGUAGE_KEY) {
            Ok(Some(code)) => Language::from_code(&code).unwrap_or_default(),
            Ok(None) => Language::default(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read language; using English");
                Language::default()
            }
        };
        Self { language }
    }

    pub(crate) fn language(&self) -> Language {
        self.language
    }

    pub(crate) fn set_language(&mut self, language: Language, store: &dyn KeyValueStore) {
        self.language = language;
        if let Err(e) = store.set(LANGUAGE_KEY, language.code()) {
            tracing::warn!(error = %e, "could not save language");
        }
    }

    /// Active language, then English, then the key itself.
    pub(crate) fn t<'a>(&self, key: &'a str) -> &'a str {
        lookup(self.language, key)
            .or_else(|| lookup(Language::English, key))
            .unwrap_or(key)
    }
}

fn lookup(language: Language, key: &str) -> Option<&'static str> {
    TABLES.get(&language).and_then(|table| table.get(key)).copied()
}
