//! Evaluator session owning a variable environment

use crate::decode::decode_record;
use crate::environment::Environment;
use crate::error::Result;
use crate::eval::evaluate;
use crate::value::Value;

/// A stateful evaluation session: one environment plus the identifier
/// resolution mode, carried across expressions.
///
/// Typical use is seeding the environment from a monitoring record and
/// then checking predicates against it:
///
/// ```
/// use typeval::{Evaluator, Value};
///
/// let mut session = Evaluator::new(false);
/// session
///     .load_record("ncpus=4;queues=[\"q1\",\"q2\"];state=\"free\";", true)
///     .unwrap();
///
/// let ok = session.eval("\"q1\" in queues && ncpus >= 2").unwrap();
/// assert_eq!(ok, Value::Bool(true));
/// ```
#[derive(Debug, Clone)]
pub struct Evaluator {
    env: Environment,
    autodefine: bool,
}

impl Default for Evaluator {
    /// An autodefining session, the common mode for probe records.
    fn default() -> Self {
        Self::new(true)
    }
}

impl Evaluator {
    /// Create a session with an empty environment.
    ///
    /// With `autodefine` set, unbound identifiers are created on first
    /// use and unified with the type they are first used against;
    /// otherwise they are undefined-variable errors.
    pub fn new(autodefine: bool) -> Self {
        Self {
            env: Environment::new(),
            autodefine,
        }
    }

    /// Whether this session autodefines unbound identifiers.
    pub fn autodefine(&self) -> bool {
        self.autodefine
    }

    /// Evaluate a statement sequence against the session environment.
    pub fn eval(&mut self, expr: &str) -> Result<Value> {
        evaluate(expr, &mut self.env, self.autodefine)
    }

    /// Seed the environment from `key=value;` record text.
    ///
    /// With `replace` the environment is cleared first; otherwise the
    /// record's entries are merged over the existing bindings.
    pub fn load_record(&mut self, text: &str, replace: bool) -> Result<()> {
        let vars = decode_record(text)?;
        self.env.bulk_load(vars, replace);
        Ok(())
    }

    /// The session environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Mutable access to the session environment.
    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }
}
