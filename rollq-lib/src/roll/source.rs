use once_cell::sync::Lazy;
use rand::Rng;
use std::sync::Arc;
use std::sync::RwLock;

/// Interface for rolling dices
pub trait Source {
    /// Return a face in `1..=sides`
    fn throw(&mut self, sides: u64) -> u64;
}

/// Random dice roller over any Rng
pub struct RandomSource<'a, T: Rng> {
    pub generator: &'a mut T,
}

impl<T: Rng> Source for RandomSource<'_, T> {
    fn throw(&mut self, sides: u64) -> u64 {
        self.generator.gen_range(1..1 + sides)
    }
}

/// Process wide draw function
pub type RollMethod = Arc<dyn Fn(u64) -> u64 + Send + Sync>;

static ROLL_METHOD: Lazy<RwLock<Option<RollMethod>>> = Lazy::new(|| RwLock::new(None));

/// Uniform draw from the thread local generator
pub fn default_roll_method(sides: u64) -> u64 {
    rand::thread_rng().gen_range(1..1 + sides)
}

/// Replace the process wide draw function, `None` restores the default
pub fn set_roll_method(method: Option<RollMethod>) {
    tracing::debug!(custom = method.is_some(), "roll method replaced");
    match ROLL_METHOD.write() {
        Ok(mut slot) => *slot = method,
        Err(poisoned) => *poisoned.into_inner() = method,
    }
}

/// Currently active draw function
pub fn get_roll_method() -> RollMethod {
    let slot = match ROLL_METHOD.read() {
        Ok(slot) => slot,
        Err(poisoned) => poisoned.into_inner(),
    };
    match slot.as_ref() {
        Some(method) => Arc::clone(method),
        None => Arc::new(default_roll_method),
    }
}

/// Source backed by the process wide draw function
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrySource;

impl Source for RegistrySource {
    fn throw(&mut self, sides: u64) -> u64 {
        get_roll_method()(sides)
    }
}
