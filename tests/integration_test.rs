// Integration tests for the simulated "Run Code" pipeline

use labsim::interpreter::{ErrorKind, Interpreter, SimError};
use labsim::{run_simulated_program, simulate, SimConfig};

/// Wraps `body` in an include line and `int main() { ... }`.
fn program(body: &str) -> String {
    format!("#include <stdio.h>\n\nint main() {{\n{}\n}}\n", body)
}

fn run(body: &str) -> String {
    run_simulated_program(&program(body))
}

const MISSING_INCLUDE: &str = "Compilation Error:\nMissing #include directive. Add #include <stdio.h> at the top of the program.";
const NO_MAIN: &str = "Compilation Error:\nNo main function found. Define int main() { ... }.";

#[test]
fn test_missing_include_wins_over_everything() {
    let sources = [
        "int main() { printf(\"hi\"); }",
        "",
        "printf(\"no main, no include\")",
        "int main() { int x = 5 / 0; }",
    ];
    for source in sources {
        assert_eq!(run_simulated_program(source), MISSING_INCLUDE, "{:?}", source);
    }
}

#[test]
fn test_missing_entry_routine() {
    assert_eq!(
        run_simulated_program("#include <stdio.h>\nint start() { return 0; }"),
        NO_MAIN
    );
    // The marker is present but has no body
    assert_eq!(
        run_simulated_program("#include <stdio.h>\nint main();"),
        NO_MAIN
    );
}

#[test]
fn test_printf_without_stdio_header() {
    let result = run_simulated_program("#include <stdlib.h>\nint main() {\n  printf(\"x\");\n}");
    assert_eq!(
        result,
        "Compilation Error:\n'printf' was not declared in this scope. Did you forget #include <stdio.h>?"
    );
}

#[test]
fn test_missing_semicolon_reports_line() {
    let source = "#include <stdio.h>\nint main() {\n  int x = 1;\n  printf(\"%d\", x)\n}";
    let report = simulate(source, &SimConfig::default());
    assert_eq!(report.error, Some(SimError::MissingSemicolon { line: 4 }));
    assert_eq!(report.error.as_ref().map(SimError::kind), Some(ErrorKind::SyntaxHeuristic));
    assert_eq!(
        report.text,
        "Compilation Error:\nLine 4: expected ';' at end of statement."
    );
}

#[test]
fn test_comments_do_not_trip_checks() {
    let body = "  // printf(\"hidden\")\n  /* printf(\"also hidden\") ; { */\n  printf(\"shown\");";
    assert_eq!(run(body), "shown");
}

#[test]
fn test_separators_inside_string_literal() {
    assert_eq!(run("printf(\"a;b{c}\");"), "a;b{c}");
}

#[test]
fn test_scenario_print_variable() {
    assert_eq!(run("int x = 5; printf(\"%d\", x);"), "5");
}

#[test]
fn test_scenario_for_loop() {
    assert_eq!(run("for(int i=0;i<3;i++){ printf(\"%d \", i); }"), "0 1 2 ");
}

#[test]
fn test_scenario_malformed_declaration_is_zero() {
    let report = simulate(
        &program("int a=4,\n  int b = 2;\n  printf(\"%d %d\", a, b);"),
        &SimConfig::default(),
    );
    assert!(report.is_success());
    assert_eq!(report.text, "0 0");
}

#[test]
fn test_scenario_scanf_first_variable() {
    assert_eq!(
        run("scanf(\"%d\", &n);\n  printf(\"n = %d\", n);"),
        "Input: 10\nn = 10"
    );
}

#[test]
fn test_scanf_cycles_by_declared_count() {
    let body = "int total = 0;\n  scanf(\"%d %d\", &a, &b);\n  total = a + b;\n  printf(\"%d\", total);";
    // total exists, so a takes index 1 and b index 2
    assert_eq!(run(body), "Input: 20\nInput: 5\n25");
}

#[test]
fn test_for_loop_iteration_cap() {
    let report = simulate(
        &program("int count = 0;\n  for (;;) { count++; }\n  printf(\"%d\", count);"),
        &SimConfig::default(),
    );
    assert_eq!(report.text, "1000");
    assert_eq!(report.capped_loops, 1);

    let report = simulate(
        &program("int n = 0;\n  while (1 == 1) { n += 2; }\n  printf(\"%d\", n);"),
        &SimConfig::default(),
    );
    assert_eq!(report.text, "2000");
    assert_eq!(report.capped_loops, 1);
}

#[test]
fn test_loop_that_ends_on_its_own_is_not_capped() {
    let report = simulate(
        &program("int s = 0;\n  for (int i = 0; i < 1000; i++) { s++; }\n  printf(\"%d\", s);"),
        &SimConfig::default(),
    );
    assert_eq!(report.text, "1000");
    assert_eq!(report.capped_loops, 0);
}

#[test]
fn test_custom_iteration_cap() {
    let config = SimConfig {
        iteration_cap: 5,
        ..SimConfig::default()
    };
    let report = simulate(&program("int i = 0;\n  while (i >= 0) { i++; }\n  printf(\"%d\", i);"), &config);
    assert_eq!(report.text, "5");
}

#[test]
fn test_declaration_without_initializer() {
    assert_eq!(run("int x;\n  printf(\"%d\", x);"), "0");
}

#[test]
fn test_array_padding_and_truncation() {
    let mut interpreter = Interpreter::new(SimConfig::default());
    interpreter
        .run(&program("int n;\n  int a[3] = {4, 7};\n  int b[2] = {1, 2, 3};"))
        .expect("run failed");
    assert!(interpreter.config().permissive);
    assert!(interpreter.namespace().contains("n"));
    // Arrays live apart from scalars
    assert!(!interpreter.namespace().contains("a"));
    assert_eq!(interpreter.namespace().array("a"), Some(&[4.0, 7.0, 0.0][..]));
    assert_eq!(interpreter.namespace().array("b"), Some(&[1.0, 2.0][..]));
}

#[test]
fn test_array_element_assignment() {
    let body = "int a[3];\n  a[1] = 5;\n  a[1] *= 3;\n  a[2] += a[1] - 1;\n  a[9] = 4;\n  printf(\"%d %d %d %d\", a[0], a[1], a[2], a[9]);";
    assert_eq!(run(body), "0 15 14 0");
}

#[test]
fn test_output_is_idempotent() {
    let source = program(
        "int sum = 0;\n  scanf(\"%d\", &k);\n  for (int i = 1; i <= 4; i++) { sum += i * k; }\n  printf(\"sum=%d\\n\", sum);",
    );
    let first = run_simulated_program(&source);
    let second = run_simulated_program(&source);
    assert_eq!(first, second);
    // `sum` is already declared, so k takes the second sample value
    assert_eq!(first, "Input: 20\nsum=200\n");

    // Reusing one interpreter must not leak state either
    let mut interpreter = Interpreter::new(SimConfig::default());
    interpreter.run(&source).expect("run failed");
    let once = interpreter.output().text();
    interpreter.run(&source).expect("run failed");
    assert_eq!(interpreter.output().text(), once);
}

#[test]
fn test_return_stops_the_run() {
    let report = simulate(
        &program("printf(\"a\");\n  return 3;\n  printf(\"b\");"),
        &SimConfig::default(),
    );
    assert_eq!(report.text, "a");
    assert_eq!(report.exit_code, Some(3));

    let body = "for (int i = 0; i < 10; i++) {\n    if (i == 2) { return 0; }\n    printf(\"%d\", i);\n  }\n  printf(\"unreachable\");";
    assert_eq!(run(body), "01");
}

#[test]
fn test_break_and_continue() {
    let body = "for (int i = 0; i < 10; i++) {\n    if (i == 3) { continue; }\n    if (i == 5) { break; }\n    printf(\"%d\", i);\n  }";
    assert_eq!(run(body), "0124");

    // Outside a loop they do nothing
    assert_eq!(run("break;\n  printf(\"still here\");"), "still here");
}

#[test]
fn test_do_while_runs_once() {
    assert_eq!(
        run("int i = 5;\n  do {\n    printf(\"%d\", i);\n    i++;\n  } while (i < 3);"),
        "5"
    );
}

#[test]
fn test_if_else_chain() {
    let body = "int x = 7;\n  if (x < 5) {\n    printf(\"small\");\n  } else if (x < 10) {\n    printf(\"medium\");\n  } else {\n    printf(\"large\");\n  }";
    assert_eq!(run(body), "medium");
    assert_eq!(run("if (2 > 1) printf(\"yes\"); else printf(\"no\");"), "yes");
    assert_eq!(run("if (2 < 1) printf(\"yes\");\n  printf(\"after\");"), "after");
}

#[test]
fn test_logical_operators_are_false() {
    let body = "if (1 < 2 && 2 < 3) {\n    printf(\"yes\");\n  } else {\n    printf(\"no\");\n  }";
    assert_eq!(run(body), "no");
}

#[test]
fn test_variables_share_one_scope() {
    let body = "for (int i = 0; i < 2; i++) {\n    int inner = i * 10;\n  }\n  printf(\"%d %d\", inner, i);";
    assert_eq!(run(body), "10 2");
}

#[test]
fn test_defines_are_expanded() {
    let source = "#include <stdio.h>\n#define SIZE 4\n#define LABEL \"n\"\nint main() {\n  printf(\"%s=%d\", LABEL, SIZE * 2);\n}";
    assert_eq!(run_simulated_program(source), "n=8");
}

#[test]
fn test_unknown_statements_are_skipped() {
    assert_eq!(run("foo(3);\n  printf(\"ok\");"), "ok");
}

#[test]
fn test_strict_mode_surfaces_unsupported() {
    let source = program("foo(3);\n  printf(\"ok\");");
    let report = simulate(&source, &SimConfig::strict());
    assert!(!report.is_success());
    assert_eq!(report.error.as_ref().map(SimError::kind), Some(ErrorKind::Unsupported));
    assert_eq!(report.text, "Runtime Error:\nUnsupported construct: 'foo(3)'.");

    let report = simulate(&program("if (x > 1 || x < 0) { }"), &SimConfig::strict());
    assert!(matches!(report.error, Some(SimError::UnsupportedConstruct { .. })));
}

#[test]
fn test_division_by_zero_is_an_error() {
    let report = simulate(
        &program("printf(\"before\");\n  int x = 5 / 0;"),
        &SimConfig::default(),
    );
    assert_eq!(report.text, "Runtime Error:\nDivision by zero in '5 / 0'.");
    assert_eq!(report.error.as_ref().map(SimError::kind), Some(ErrorKind::Runtime));
    assert!(report.variables.is_empty());

    let report = simulate(&program("int x = 4;\n  x %= 0;"), &SimConfig::default());
    assert!(matches!(report.error, Some(SimError::DivisionByZero { .. })));
}

#[test]
fn test_nesting_limit() {
    let body = format!("{}int x = 1;{}", "{ ".repeat(70), " }".repeat(70));
    let report = simulate(&program(&body), &SimConfig::default());
    assert_eq!(report.error, Some(SimError::NestingTooDeep { limit: 64 }));

    let body = format!("{}printf(\"deep\");{}", "{ ".repeat(10), " }".repeat(10));
    assert_eq!(run(&body), "deep");
}

#[test]
fn test_report_lists_final_variables() {
    let report = simulate(&program("int b = 2;\n  int a = b * 3;"), &SimConfig::default());
    assert_eq!(
        report.variables,
        vec![("a".to_string(), 6.0), ("b".to_string(), 2.0)]
    );
}

#[test]
fn test_output_lines() {
    let mut interpreter = Interpreter::new(SimConfig::default());
    interpreter
        .run(&program("printf(\"one\\ntwo\\n\");\n  printf(\"three\");"))
        .expect("run failed");
    assert_eq!(interpreter.output().lines(), vec!["one", "two", "three"]);
    assert!(!interpreter.output().is_empty());
    assert!(interpreter.statements_executed() >= 2);
}

#[test]
fn test_long_sum_runs_on_a_worker_thread() {
    // Runs off the main thread the way the TUI does, with its smaller stack
    let terms = vec!["1"; 3000].join(" + ");
    let source = program(&format!("int x = {};\n  printf(\"%d\", x);", terms));
    let result = std::thread::spawn(move || run_simulated_program(&source))
        .join()
        .expect("worker thread panicked");
    assert_eq!(result, "3000");
}

#[test]
fn test_deep_parentheses_are_an_error() {
    let expr = format!("{}1{}", "(".repeat(3000), ")".repeat(3000));
    let source = program(&format!("int x = {};\n  printf(\"%d\", x);", expr));
    let report = std::thread::spawn(move || simulate(&source, &SimConfig::default()))
        .join()
        .expect("worker thread panicked");
    assert_eq!(report.error, Some(SimError::ExpressionTooDeep { limit: 256 }));
    assert_eq!(report.text, "Runtime Error:\nExpression nested deeper than 256 levels.");
}

#[test]
fn test_long_else_if_chain_is_not_nesting() {
    let arms: Vec<String> = (0..70)
        .map(|i| format!("if (x == {}) {{ printf(\"arm {}\"); }}", i, i))
        .collect();
    let body = format!("int x = 69;\n  {}\n  else {{ printf(\"none\"); }}", arms.join(" else "));
    let report = simulate(&program(&body), &SimConfig::default());
    assert!(report.is_success(), "run failed: {}", report.text);
    assert_eq!(report.text, "arm 69");

    let body = body.replacen("int x = 69", "int x = 99", 1);
    assert_eq!(run(&body), "none");
}
