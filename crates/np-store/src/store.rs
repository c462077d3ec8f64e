//! The local state store: one in-memory document mirroring durable
//! storage, with every accessor/mutator operation the storefront needs.
//!
//! Mutations build the next document on a working copy and adopt it only
//! after the backend write succeeds, so an order, its wallet debit, and
//! its ledger entry land as a single unit or not at all.

use crate::{Clock, StateBackend, SystemClock, new_id};
use np_types::{Order, OrderStatus, Product, StateDocument, Transaction, TxKind, User};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("insufficient wallet balance: need {needed} HTG, have {available} HTG")]
    InsufficientFunds { needed: u128, available: u128 },
    #[error("this email is already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("wallet balance overflow")]
    BalanceOverflow,
    #[error("storage backend: {0}")]
    Backend(String),
    #[error("serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Listener = Box<dyn Fn(&StateDocument)>;

pub struct Store<B, C = SystemClock> {
    backend: B,
    clock: C,
    doc: StateDocument,
    listeners: Vec<Listener>,
}

impl<B: StateBackend> Store<B> {
    pub fn open(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: StateBackend, C: Clock> Store<B, C> {
    /// Open the store over `backend`. Absent or corrupt persisted content
    /// degrades silently to the seeded default document; loading never
    /// fails.
    pub fn with_clock(backend: B, clock: C) -> Self {
        let doc = load_document(&backend);
        Self {
            backend,
            clock,
            doc,
            listeners: Vec::new(),
        }
    }

    pub fn document(&self) -> &StateDocument {
        &self.doc
    }

    pub fn current_user(&self) -> Option<&User> {
        self.doc.current_user()
    }

    pub fn products(&self) -> &[Product] {
        &self.doc.products
    }

    /// Orders for one user, most-recent-first.
    pub fn orders_for(&self, user_id: &str) -> Vec<&Order> {
        self.doc
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .collect()
    }

    /// Ledger entries for one user, most-recent-first.
    pub fn transactions_for(&self, user_id: &str) -> Vec<&Transaction> {
        self.doc
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .collect()
    }

    /// Register a change listener. Listeners receive the committed
    /// document after every persist and after [`Store::refresh`] adopts
    /// an external change. Listeners must not call back into the store.
    pub fn subscribe(&mut self, listener: impl Fn(&StateDocument) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Persist the current document wholesale (last-writer-wins).
    pub fn save(&mut self) -> Result<(), StoreError> {
        let next = self.doc.clone();
        self.commit(next)
    }

    /// Create a user with an empty wallet and sign them in. Email
    /// uniqueness is case-insensitive; the stored email is lowercased.
    pub fn register(
        &mut self,
        full_name: &str,
        email: &str,
        password: &str,
    ) -> Result<(), StoreError> {
        let email = email.trim().to_lowercase();
        if self.doc.users.iter().any(|u| u.email == email) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: new_id("U"),
            full_name: full_name.trim().to_owned(),
            email,
            password: password.to_owned(),
            wallet: 0,
        };

        let mut next = self.doc.clone();
        next.current_user_id = Some(user.id.clone());
        next.users.push(user);
        self.commit(next)
    }

    /// Sign in on an exact email + password match. One generic failure:
    /// callers cannot tell an unknown email from a wrong password.
    pub fn login(&mut self, email: &str, password: &str) -> Result<(), StoreError> {
        let email = email.trim().to_lowercase();
        let user_id = self
            .doc
            .users
            .iter()
            .find(|u| u.email == email && u.password == password)
            .map(|u| u.id.clone())
            .ok_or(StoreError::InvalidCredentials)?;

        let mut next = self.doc.clone();
        next.current_user_id = Some(user_id);
        self.commit(next)
    }

    pub fn logout(&mut self) -> Result<(), StoreError> {
        let mut next = self.doc.clone();
        next.current_user_id = None;
        self.commit(next)
    }

    /// Rewrite the signed-in user's name and email.
    pub fn update_profile(&mut self, full_name: &str, email: &str) -> Result<(), StoreError> {
        let user_id = self.current_user().ok_or(StoreError::NotSignedIn)?.id.clone();

        let mut next = self.doc.clone();
        if let Some(user) = next.users.iter_mut().find(|u| u.id == user_id) {
            user.full_name = full_name.trim().to_owned();
            user.email = email.trim().to_lowercase();
        }
        self.commit(next)
    }

    /// Pay `amount` from the signed-in user's wallet for `product_name`.
    ///
    /// The only path that creates an order: the debit, the order, and the
    /// `Debit` ledger entry are committed together. Insufficient funds
    /// leave the document untouched.
    pub fn purchase(&mut self, product_name: &str, amount: u128) -> Result<(), StoreError> {
        let now = self.clock.now_epoch_ms();
        let user = self.current_user().ok_or(StoreError::NotSignedIn)?;
        if amount > user.wallet {
            return Err(StoreError::InsufficientFunds {
                needed: amount,
                available: user.wallet,
            });
        }
        let user_id = user.id.clone();

        let mut next = self.doc.clone();
        if let Some(user) = next.users.iter_mut().find(|u| u.id == user_id) {
            user.wallet -= amount;
        }
        next.orders.insert(
            0,
            Order {
                id: new_id("ORD"),
                user_id: user_id.clone(),
                product: product_name.to_owned(),
                amount,
                status: OrderStatus::Delivered,
                at_epoch_ms: now,
            },
        );
        next.transactions.insert(
            0,
            Transaction {
                id: new_id("TX"),
                user_id,
                kind: TxKind::Debit,
                amount,
                label: format!("Order {product_name}"),
                at_epoch_ms: now,
            },
        );
        self.commit(next)
    }

    /// Credit the signed-in user's wallet and record a `Credit` ledger
    /// entry. Amount and proof validation are the caller's job.
    pub fn top_up(&mut self, amount: u128, label: &str) -> Result<(), StoreError> {
        let now = self.clock.now_epoch_ms();
        let user_id = self.current_user().ok_or(StoreError::NotSignedIn)?.id.clone();

        let mut next = self.doc.clone();
        if let Some(user) = next.users.iter_mut().find(|u| u.id == user_id) {
            user.wallet = user
                .wallet
                .checked_add(amount)
                .ok_or(StoreError::BalanceOverflow)?;
        }
        next.transactions.insert(
            0,
            Transaction {
                id: new_id("TX"),
                user_id,
                kind: TxKind::Credit,
                amount,
                label: label.to_owned(),
                at_epoch_ms: now,
            },
        );
        self.commit(next)
    }

    /// Re-read the backend and adopt an external write wholesale,
    /// notifying listeners. Returns whether a change was adopted.
    /// Callers drive this from the platform's storage-change event and
    /// from a fixed-interval poll; whichever tab wrote last wins.
    pub fn refresh(&mut self) -> bool {
        let latest = load_document(&self.backend);
        if latest == self.doc {
            return false;
        }
        self.doc = latest;
        self.notify();
        true
    }

    /// Persist `next`, then adopt it as the in-memory mirror. The mirror
    /// only changes after the backend write succeeds.
    fn commit(&mut self, next: StateDocument) -> Result<(), StoreError> {
        let raw = serde_json::to_string(&next)?;
        self.backend
            .write(&raw)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        self.doc = next;
        self.notify();
        Ok(())
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener(&self.doc);
        }
    }
}

fn load_document<B: StateBackend>(backend: &B) -> StateDocument {
    match backend.read() {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
        Ok(None) | Err(_) => StateDocument::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryBackend;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Copy)]
    struct FixedClock(u128);

    impl Clock for FixedClock {
        fn now_epoch_ms(&self) -> u128 {
            self.0
        }
    }

    /// Reads from the wrapped backend but refuses every write.
    struct ReadOnlyBackend(MemoryBackend);

    impl StateBackend for ReadOnlyBackend {
        fn read(&self) -> anyhow::Result<Option<String>> {
            self.0.read()
        }

        fn write(&self, _raw: &str) -> anyhow::Result<()> {
            Err(anyhow::anyhow!("storage quota exceeded"))
        }
    }

    fn store_with_balance(wallet: u128) -> Store<MemoryBackend, FixedClock> {
        let mut store =
            Store::with_clock(MemoryBackend::default(), FixedClock(1_700_000_000_000));
        store
            .register("Test User", "user@example.com", "secret")
            .expect("register");
        if wallet > 0 {
            store.top_up(wallet, "Initial top-up").expect("top up");
        }
        store
    }

    #[test]
    fn register_signs_in_with_empty_wallet() {
        let backend = MemoryBackend::default();
        let mut store = Store::open(backend.clone());

        store
            .register("Test User", "User@Example.COM", "secret")
            .expect("register");

        let user = store.current_user().expect("signed in");
        assert_eq!(user.email, "user@example.com");
        assert_eq!(user.wallet, 0);
        assert!(user.id.starts_with("U-"));

        // Persisted: a fresh store over the same backend sees the user.
        let reopened = Store::open(backend);
        assert_eq!(reopened.document().users.len(), 1);
        assert_eq!(
            reopened.document().current_user_id,
            store.document().current_user_id
        );
    }

    #[test]
    fn duplicate_email_differing_only_by_case_is_rejected() {
        let mut store = store_with_balance(0);

        let err = store
            .register("Other User", "USER@example.com", "other")
            .expect_err("duplicate email");

        assert!(matches!(err, StoreError::DuplicateEmail));
        assert_eq!(store.document().users.len(), 1);
    }

    #[test]
    fn login_requires_exact_credentials() {
        let mut store = store_with_balance(0);
        store.logout().expect("logout");
        assert!(store.current_user().is_none());

        let err = store
            .login("user@example.com", "wrong")
            .expect_err("wrong password");
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert!(store.current_user().is_none());

        store
            .login("USER@example.com ", "secret")
            .expect("case-insensitive email login");
        assert!(store.current_user().is_some());
    }

    #[test]
    fn purchase_debits_wallet_and_records_order_and_ledger_entry() {
        let mut store = store_with_balance(200);
        let orders_before = store.document().orders.len();
        let txs_before = store.document().transactions.len();

        store
            .purchase("Free Fire - Diamonds", 157)
            .expect("purchase");

        let user = store.current_user().expect("signed in");
        assert_eq!(user.wallet, 43);

        let orders = store.orders_for(&user.id);
        assert_eq!(orders.len(), orders_before + 1);
        let order = orders[0];
        assert_eq!(order.product, "Free Fire - Diamonds");
        assert_eq!(order.amount, 157);
        assert_eq!(order.status, OrderStatus::Delivered);
        assert!(order.id.starts_with("ORD-"));

        let txs = store.transactions_for(&user.id);
        assert_eq!(txs.len(), txs_before + 1);
        let tx = txs[0];
        assert_eq!(tx.kind, TxKind::Debit);
        assert_eq!(tx.amount, 157);
        assert_eq!(tx.label, "Order Free Fire - Diamonds");
    }

    #[test]
    fn purchase_with_insufficient_funds_changes_nothing() {
        let mut store = store_with_balance(50);
        let before = store.document().clone();

        let err = store
            .purchase("Free Fire - Diamonds", 157)
            .expect_err("insufficient funds");

        assert!(matches!(
            err,
            StoreError::InsufficientFunds {
                needed: 157,
                available: 50
            }
        ));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn purchase_requires_a_signed_in_user() {
        let mut store = store_with_balance(200);
        store.logout().expect("logout");

        let err = store
            .purchase("Free Fire - Diamonds", 157)
            .expect_err("signed out");
        assert!(matches!(err, StoreError::NotSignedIn));
        assert!(store.document().orders.is_empty());
    }

    #[test]
    fn failed_backend_write_leaves_the_mirror_untouched() {
        // Seed a signed-in user with funds through a writable backend,
        // then reopen the same content behind a backend that rejects
        // every write.
        let seed = MemoryBackend::default();
        let mut setup = Store::open(seed.clone());
        setup
            .register("Test User", "user@example.com", "secret")
            .expect("register");
        setup.top_up(200, "Recharge via MonCash").expect("top up");

        let mut store = Store::open(ReadOnlyBackend(seed));
        let before = store.document().clone();

        let err = store
            .purchase("Free Fire - Diamonds", 157)
            .expect_err("write fails");

        assert!(matches!(err, StoreError::Backend(_)));
        assert_eq!(store.document(), &before);
        assert_eq!(store.current_user().expect("signed in").wallet, 200);
        assert!(store.document().orders.is_empty());
    }

    #[test]
    fn top_up_overflowing_the_wallet_is_rejected() {
        let mut store = store_with_balance(0);
        store.top_up(u128::MAX, "Recharge via MonCash").expect("top up");
        let before = store.document().clone();

        let err = store
            .top_up(1, "Recharge via NatCash")
            .expect_err("overflow");

        assert!(matches!(err, StoreError::BalanceOverflow));
        assert_eq!(store.document(), &before);
    }

    #[test]
    fn credit_then_debit_of_same_amount_round_trips_balance() {
        let mut store = store_with_balance(200);

        store.top_up(157, "Recharge via MonCash").expect("top up");
        store
            .purchase("Free Fire - Diamonds", 157)
            .expect("purchase");

        assert_eq!(store.current_user().expect("signed in").wallet, 200);
    }

    #[test]
    fn ledger_and_orders_are_most_recent_first() {
        let mut store = store_with_balance(500);

        store.purchase("First Pack", 100).expect("purchase");
        store.purchase("Second Pack", 100).expect("purchase");

        assert_eq!(store.document().orders[0].product, "Second Pack");
        assert_eq!(store.document().orders[1].product, "First Pack");
        assert_eq!(store.document().transactions[0].label, "Order Second Pack");
    }

    #[test]
    fn document_round_trips_through_the_backend() {
        let backend = MemoryBackend::default();
        let mut store = Store::open(backend.clone());
        store
            .register("Test User", "user@example.com", "secret")
            .expect("register");
        store.top_up(300, "Recharge via NatCash").expect("top up");
        store.purchase("PUBG UC 60", 180).expect("purchase");

        let reopened = Store::open(backend);
        assert_eq!(reopened.document(), store.document());
    }

    #[test]
    fn corrupt_persisted_state_resets_to_defaults() {
        let backend = MemoryBackend::default();
        backend.write("{not json").expect("write garbage");

        let store = Store::open(backend);

        assert_eq!(store.document(), &StateDocument::default());
        assert_eq!(store.products().len(), 6);
        assert!(store.current_user().is_none());
    }

    #[test]
    fn update_profile_rewrites_name_and_lowercases_email() {
        let mut store = store_with_balance(0);

        store
            .update_profile("  New Name ", "New@Example.com")
            .expect("update profile");

        let user = store.current_user().expect("signed in");
        assert_eq!(user.full_name, "New Name");
        assert_eq!(user.email, "new@example.com");
    }

    #[test]
    fn refresh_adopts_external_writes_and_notifies_listeners() {
        let backend = MemoryBackend::default();
        let mut tab_b = Store::open(backend.clone());
        assert!(!tab_b.refresh(), "no external change yet");

        let notified = Rc::new(Cell::new(0_u32));
        let seen = notified.clone();
        tab_b.subscribe(move |_| seen.set(seen.get() + 1));

        // Another tab registers and tops up through the shared backend.
        let mut tab_a = Store::open(backend);
        tab_a
            .register("Test User", "user@example.com", "secret")
            .expect("register");
        tab_a.top_up(200, "Recharge via MonCash").expect("top up");

        assert!(tab_b.refresh(), "external write adopted");
        assert_eq!(tab_b.document(), tab_a.document());
        assert_eq!(notified.get(), 1);

        assert!(!tab_b.refresh(), "no further change");
        assert_eq!(notified.get(), 1);
    }

    #[test]
    fn listeners_fire_on_every_commit() {
        let mut store = store_with_balance(0);
        let notified = Rc::new(Cell::new(0_u32));
        let seen = notified.clone();
        store.subscribe(move |doc| {
            assert!(doc.current_user_id.is_some());
            seen.set(seen.get() + 1);
        });

        store.top_up(100, "Recharge via MonCash").expect("top up");
        store.purchase("Blood Strike GOLD", 100).expect("purchase");

        assert_eq!(notified.get(), 2);
    }

    #[test]
    fn save_persists_the_mirror_wholesale() {
        let backend = MemoryBackend::default();
        let mut store = Store::open(backend.clone());
        store
            .register("Test User", "user@example.com", "secret")
            .expect("register");

        store.save().expect("save");

        let raw = backend.read().expect("read").expect("present");
        let parsed: StateDocument = serde_json::from_str(&raw).expect("parses");
        assert_eq!(&parsed, store.document());
    }
}
