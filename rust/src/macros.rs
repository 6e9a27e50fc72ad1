//! Internal macros shared by the container modules.

/// Emit a debug-level tracing event when the `tracing` feature is enabled.
/// Compiles to nothing otherwise; the arguments are not evaluated.
macro_rules! trace_event {
    ($($arg:tt)+) => {{
        #[cfg(feature = "tracing")]
        tracing::debug!($($arg)+);
    }};
}

/// Generate the four bound-query methods of a wrapper whose engine lives in
/// `self.tree`. Each entry names the bound kind and the relation docs for the
/// forward and reverse variant.
macro_rules! bound_queries {
    ($($kind:ident: $forward_doc:literal, $reverse_doc:literal;)+) => {
        paste::paste! {
            $(
                #[doc = $forward_doc]
                pub fn [<$kind _bound>](&self, key: &K) -> Cursor {
                    self.tree.[<$kind _bound>](key)
                }

                #[doc = $reverse_doc]
                pub fn [<reverse_ $kind _bound>](&self, key: &K) -> Cursor {
                    self.tree.[<reverse_ $kind _bound>](key)
                }
            )+
        }
    };
}

pub(crate) use bound_queries;
pub(crate) use trace_event;

/// Panic with the violated invariant when a container fails its self-check.
#[macro_export]
macro_rules! assert_tree_valid {
    ($tree:expr) => {{
        if let Err(e) = $tree.check_invariants_detailed() {
            panic!("Tree invariants violated: {}", e);
        }
    }};
    ($tree:expr, $($context:tt)+) => {{
        if let Err(e) = $tree.check_invariants_detailed() {
            panic!("Tree invariants violated ({}): {}", format!($($context)+), e);
        }
    }};
}
