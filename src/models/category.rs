//! Transaction category model.

use serde::{Deserialize, Serialize};

use super::{CategoryId, CategoryKind};

/// A transaction category (income or expense).
///
/// Transactions reference categories by display name, not by ID; the
/// derived [`Self::key`] is the normalized form used for lookups such as
/// translation tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Whether the category classifies incomes or expenses.
    #[serde(rename = "type")]
    pub kind: CategoryKind,
    /// Display color token (e.g. `"bg-red-700"`).
    pub color: String,
}

impl Category {
    /// Normalized lookup key: lowercased, whitespace runs collapsed to
    /// single underscores.
    #[inline]
    #[must_use]
    pub fn key(&self) -> String {
        self.name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_category() {
        let json = r#"{
            "id": 11,
            "name": "Salário",
            "type": "income",
            "color": "bg-green-500"
        }"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new(11));
        assert_eq!(category.kind, CategoryKind::Income);
        assert_eq!(category.color, "bg-green-500");
    }

    #[test]
    fn key_normalizes_name() {
        let category = Category {
            id: CategoryId::new(18),
            name: "Plano de Saúde".to_owned(),
            kind: CategoryKind::Expense,
            color: "bg-rose-500".to_owned(),
        };
        assert_eq!(category.key(), "plano_de_saúde");
    }

    #[test]
    fn key_collapses_whitespace_runs() {
        let category = Category {
            id: CategoryId::new(19),
            name: "Poupança  e   Investimentos".to_owned(),
            kind: CategoryKind::Expense,
            color: "bg-amber-600".to_owned(),
        };
        assert_eq!(category.key(), "poupança_e_investimentos");
    }

    #[test]
    fn serialize_uses_type_key() {
        let category = Category {
            id: CategoryId::new(1),
            name: "Aluguel".to_owned(),
            kind: CategoryKind::Expense,
            color: "bg-red-700".to_owned(),
        };
        let json = serde_json::to_string(&category).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, category);
    }
}
