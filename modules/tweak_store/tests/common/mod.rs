//! Common test utilities: mock persistence, recorders and tweak fixtures
#![allow(dead_code)]

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tweak_store::{Color, StoredValue, Tweak, TweakPersistence};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn print_test_header(test_name: &str, purpose: &[&str]) {
    println!("\n🧪 TEST: {}", test_name);
    if let Some(first) = purpose.first() {
        println!("📋 PURPOSE: {}", first);
    }
    for line in purpose.iter().skip(1) {
        println!("   {}", line);
    }
}

/// In-memory persistence that counts calls and can be told to fail
#[derive(Default)]
pub struct MockPersistence {
    data: RwLock<HashMap<String, StoredValue>>,
    failing: AtomicBool,
    gets: AtomicUsize,
    sets: AtomicUsize,
    clears: AtomicUsize,
}

impl MockPersistence {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a raw value, bypassing the store
    pub fn seed(&self, key: &str, value: StoredValue) {
        self.data.write().insert(key.to_string(), value);
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn count(&self) -> usize {
        self.data.read().len()
    }

    pub fn get_calls(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn set_calls(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn clear_calls(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn check(&self) -> anyhow::Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            anyhow::bail!("mock persistence unavailable");
        }
        Ok(())
    }
}

impl TweakPersistence for MockPersistence {
    fn get(&self, key: &str) -> anyhow::Result<Option<StoredValue>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(self.data.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: StoredValue) -> anyhow::Result<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.data.write().insert(key.to_string(), value);
        Ok(())
    }

    fn clear_all(&self) -> anyhow::Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        self.data.write().clear();
        Ok(())
    }
}

/// Shared log of callback invocations
#[derive(Clone, Default)]
pub struct Recorder<T> {
    calls: Arc<Mutex<Vec<T>>>,
}

impl<T: Clone + Send + 'static> Recorder<T> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Callback pushing every value it receives
    pub fn value_callback(&self) -> impl Fn(T) + Send + Sync + 'static {
        let calls = Arc::clone(&self.calls);
        move |value| calls.lock().push(value)
    }

    /// Callback pushing a fixed label
    pub fn label_callback(&self, label: T) -> impl Fn() + Send + Sync + 'static
    where
        T: Sync,
    {
        let calls = Arc::clone(&self.calls);
        move || calls.lock().push(label.clone())
    }

    pub fn calls(&self) -> Vec<T> {
        self.calls.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.calls.lock().len()
    }
}

/// The UI color pair used across tests
pub struct ColorTweaks {
    pub background: Tweak<Color>,
    pub foreground: Tweak<Color>,
}

impl ColorTweaks {
    pub fn new() -> Self {
        Self {
            background: Tweak::new("UI", "Colors", "background", Color::WHITE),
            foreground: Tweak::new("UI", "Colors", "foreground", Color::BLACK),
        }
    }
}
