pub mod keyvec;
pub mod peek;

/// Snapshot `$output` as YAML, recording the source text it was produced
/// from. Callers need `insta` as a dev-dependency.
#[macro_export]
macro_rules! assert_yaml_snapshot_with_source {
    ($name:expr; $source:expr => $output:expr) => {{
        insta::with_settings!({
            info => &$source,
            omit_expression => true,
        }, {
            insta::assert_yaml_snapshot!($name, $output);
        })
    }};
}
