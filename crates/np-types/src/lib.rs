use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub full_name: String,
    /// Stored lowercased; uniqueness is case-insensitive.
    pub email: String,
    pub password: String,
    /// Prepaid balance in whole HTG.
    pub wallet: u128,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u128,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    #[default]
    Delivered,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub user_id: String,
    /// Product name as purchased, including pack/contact decorations.
    pub product: String,
    pub amount: u128,
    pub status: OrderStatus,
    pub at_epoch_ms: u128,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TxKind {
    Credit,
    Debit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub kind: TxKind,
    pub amount: u128,
    pub label: String,
    pub at_epoch_ms: u128,
}

/// The single persisted aggregate. Orders and transactions are kept
/// most-recent-first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct StateDocument {
    pub users: Vec<User>,
    pub current_user_id: Option<String>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub transactions: Vec<Transaction>,
}

impl Default for StateDocument {
    fn default() -> Self {
        Self {
            users: Vec::new(),
            current_user_id: None,
            products: default_catalog(),
            orders: Vec::new(),
            transactions: Vec::new(),
        }
    }
}

impl StateDocument {
    pub fn current_user(&self) -> Option<&User> {
        let id = self.current_user_id.as_deref()?;
        self.users.iter().find(|u| u.id == id)
    }
}

/// Static product catalog seeded into a fresh document.
pub fn default_catalog() -> Vec<Product> {
    let seed = [
        ("p1", "Free Fire - Diamonds", 157),
        ("p2", "FC Mobile - Points", 95),
        ("p3", "eFootball - Pièces", 220),
        ("p4", "PUBG Mobile - UC", 180),
        ("p5", "Blood Strike - GOLD", 157),
        ("p6", "Roblox - Robux", 750),
    ];

    seed.into_iter()
        .map(|(id, name, price)| Product {
            id: id.to_owned(),
            name: name.to_owned(),
            price,
            category: "Mobile".to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_document_seeds_catalog_only() {
        let doc = StateDocument::default();

        assert!(doc.users.is_empty());
        assert!(doc.current_user_id.is_none());
        assert!(doc.orders.is_empty());
        assert!(doc.transactions.is_empty());
        assert_eq!(doc.products.len(), 6);
        assert_eq!(doc.products[0].id, "p1");
        assert_eq!(doc.products[0].price, 157);
    }

    #[test]
    fn persisted_shape_uses_camel_case_keys() {
        let mut doc = StateDocument::default();
        doc.users.push(User {
            id: "U-1".into(),
            full_name: "Test User".into(),
            email: "user@example.com".into(),
            password: "secret".into(),
            wallet: 43,
        });
        doc.current_user_id = Some("U-1".into());
        doc.orders.push(Order {
            id: "ORD-1".into(),
            user_id: "U-1".into(),
            product: "Free Fire - Diamonds".into(),
            amount: 157,
            status: OrderStatus::Delivered,
            at_epoch_ms: 1_700_000_000_000,
        });
        doc.transactions.push(Transaction {
            id: "TX-1".into(),
            user_id: "U-1".into(),
            kind: TxKind::Debit,
            amount: 157,
            label: "Order Free Fire - Diamonds".into(),
            at_epoch_ms: 1_700_000_000_000,
        });

        let raw = serde_json::to_string(&doc).expect("document serializes");

        assert!(raw.contains("\"currentUserId\""));
        assert!(raw.contains("\"fullName\""));
        assert!(raw.contains("\"userId\""));
        assert!(raw.contains("\"atEpochMs\""));
        assert!(raw.contains("\"Delivered\""));
        assert!(raw.contains("\"Debit\""));
    }

    #[test]
    fn partial_document_fills_missing_fields_from_defaults() {
        let raw = r#"{"users":[{"id":"U-1","fullName":"A","email":"a@b.c","password":"x","wallet":0}]}"#;
        let doc: StateDocument = serde_json::from_str(raw).expect("partial document parses");

        assert_eq!(doc.users.len(), 1);
        assert_eq!(doc.products, default_catalog());
        assert!(doc.orders.is_empty());
    }
}
