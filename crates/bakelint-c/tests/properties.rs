use bakelint_c::analyze_c;
use bakelint_core::classify;
use proptest::prelude::*;

fn c_fragment() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("#include <stdio.h>".to_string()),
            Just("int main(void) {".to_string()),
            Just("void main() {".to_string()),
            Just("  int x = 1".to_string()),
            Just("  char buf[16];".to_string()),
            Just("  printf(\"%s\", buf);".to_string()),
            Just("  printf(\"hi\");".to_string()),
            Just("  scanf(\"%d\", &x);".to_string()),
            Just("  gets(buf);".to_string()),
            Just("  p = malloc(4);".to_string()),
            Just("\treturn 0;".to_string()),
            Just("}".to_string()),
            "[ -~\t]{0,40}",
        ],
        0..24,
    )
    .prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn analysis_is_deterministic(source in c_fragment()) {
        prop_assert_eq!(analyze_c(&source), analyze_c(&source));
    }

    #[test]
    fn analysis_is_total_on_arbitrary_text(source in any::<String>()) {
        let diagnostics = analyze_c(&source);
        let line_count = source.split('\n').count();
        for diagnostic in &diagnostics {
            prop_assert!(diagnostic.message.starts_with("C: "));
            if let Some(line) = diagnostic.line {
                prop_assert!(line >= 1 && line <= line_count);
            }
        }
    }

    #[test]
    fn severity_agrees_with_classifier(source in c_fragment()) {
        for diagnostic in analyze_c(&source) {
            prop_assert_eq!(classify(&diagnostic.message), diagnostic.severity);
        }
    }
}
