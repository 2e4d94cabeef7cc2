//! Starter buffers shown before the user types anything.

use bakelint_core::SourceKind;

/// Starter C snippet. Analyzes clean.
pub const DEFAULT_C_SOURCE: &str = r#"#include <stdio.h>

int main(void) {
  printf("Hello Steel\n");
  fflush(stdout);
  return 0;
}"#;

/// Starter buildconf document. Analyzes clean.
pub const DEFAULT_BUILDCONF_SOURCE: &str = r#"!muf 4

[workspace]
  .set name "demo"
  .set root "."
  .set target_dir "target"
  .set profile "debug"
..

[profile debug]
  .set mode "debug"
..

[tool cc]
  .exec "cc"
..

[bake build]
  .make c_src cglob "src/**/*.c"
  [run cc]
    .takes c_src as "@args"
    .set "-O2" 1
    .set "-g" 1
    .emits exe as "-o"
  ..
  .output exe "target/out/app.exe"
..

[export]
  .ref build
..
"#;

/// The starter buffer for `kind`.
pub fn default_source(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::C => DEFAULT_C_SOURCE,
        SourceKind::Buildconf => DEFAULT_BUILDCONF_SOURCE,
    }
}
