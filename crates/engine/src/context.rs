//! Per-step context variables

use indexmap::IndexMap;

/// Name of the hook being executed
pub const HOOK_TYPE: &str = "GIKS_HOOK_TYPE";

/// Variables available to a single step
///
/// Built fresh for every step from the mixin output and the hook name. Plugin
/// steps additionally merge their configured vars on top.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContextVars {
    vars: IndexMap<String, String>,
}

impl ContextVars {
    /// Base variables of a step
    pub fn new(hook: &str, mixins: IndexMap<String, String>) -> Self {
        let mut vars = mixins;
        vars.insert(HOOK_TYPE.to_string(), hook.to_string());
        Self { vars }
    }

    /// Merge plugin variables
    ///
    /// A value naming an existing variable is replaced by that variable's
    /// value. Resolution looks at the variables present before the merge and
    /// happens exactly once, so chains of names are not followed.
    #[must_use]
    pub fn with_plugin_vars(mut self, plugin_vars: &IndexMap<String, String>) -> Self {
        let resolved: Vec<_> = plugin_vars
            .iter()
            .map(|(key, value)| {
                let value = self.vars.get(value).unwrap_or(value).clone();
                (key.clone(), value)
            })
            .collect();

        self.vars.extend(resolved);
        self
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// All variables in insertion order
    pub fn vars(&self) -> &IndexMap<String, String> {
        &self.vars
    }

    /// Environment for shell based steps
    ///
    /// Every mixin variable is also exported as `<NAME>_ARRAY`, a shell array
    /// literal usable as `files=${GIKS_MIXIN_STAGED_FILES_ARRAY}` in shells
    /// that support arrays.
    pub fn shell_env(&self) -> IndexMap<String, String> {
        let mut env = self.vars.clone();

        for (name, value) in &self.vars {
            if name.contains("MIXIN") {
                env.insert(format!("{name}_ARRAY"), shell_array(value));
            }
        }

        env
    }
}

/// Space separated list to a quoted shell array literal
fn shell_array(list: &str) -> String {
    let items: Vec<_> = list.split_whitespace().collect();
    format!("({})", shell_words::join(items))
}
