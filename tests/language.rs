use std::{fs, num::NonZeroUsize};

use matcalc::{
    error::{ErrorKind, RuntimeError},
    interpreter::{
        evaluator::{
            core::{Context, EvalConfig},
            report::{INVALID_PRINT, Transcript},
        },
        value::{core::Value, element_type::ElementType},
    },
    run_source,
};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

fn run_with(src: &str, config: EvalConfig) -> (Transcript, Context) {
    let mut transcript = Transcript::default();
    let context =
        run_source(src, config, &mut transcript).unwrap_or_else(|e| panic!("Script did not parse: {e}\n{src}"));
    (transcript, context)
}

fn run(src: &str) -> (Transcript, Context) {
    run_with(src, EvalConfig::default())
}

fn output_of(src: &str) -> Vec<String> {
    let (transcript, _) = run(src);
    assert!(transcript.diagnostics.is_empty(),
            "Script reported errors: {:?}\n{src}",
            transcript.diagnostics);
    transcript.output
}

fn single_error(src: &str) -> (RuntimeError, Transcript, Context) {
    let (transcript, context) = run(src);
    assert_eq!(transcript.diagnostics.len(),
               1,
               "Expected exactly one error from:\n{src}");
    (transcript.diagnostics[0].clone(), transcript, context)
}

fn assert_parse_failure(src: &str) {
    let mut transcript = Transcript::default();
    assert!(run_source(src, EvalConfig::default(), &mut transcript).is_err(),
            "Script parsed but was expected to fail:\n{src}");
    assert!(transcript.output.is_empty());
}

#[test]
fn sample_programs_run_cleanly() {
    let mut count = 0;
    let blocked = EvalConfig::new(true, NonZeroUsize::MIN);

    for entry in WalkDir::new("programs").into_iter()
                                         .filter_map(Result::ok)
                                         .filter(|e| e.path().extension().is_some_and(|ext| ext == "mc"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        count += 1;

        let (naive, _) = run(&source);
        assert!(naive.diagnostics.is_empty(),
                "{path:?} reported errors: {:?}",
                naive.diagnostics);
        assert!(!naive.output.is_empty(), "{path:?} printed nothing");

        let (tiled, _) = run_with(&source, blocked);
        assert_eq!(naive, tiled, "{path:?} differs with the blocked kernel");
    }

    assert!(count > 0, "No sample programs found in programs/");
}

#[test]
fn readme_examples_work() {
    let content = fs::read_to_string("README.md").unwrap_or_else(|e| panic!("Failed to read README.md: {e}"));
    let blocks = extract_dsl_blocks(&content);

    for (i, code) in blocks.iter().enumerate() {
        let (transcript, _) = run(code);
        assert!(transcript.diagnostics.is_empty(),
                "README example {} failed:\n{code}\nErrors: {:?}",
                i + 1,
                transcript.diagnostics);
    }

    assert!(!blocks.is_empty(), "No matcalc examples found in README.md");
}

fn extract_dsl_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```matcalc") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

#[test]
fn scalar_arithmetic_keeps_integer_type() {
    assert_eq!(output_of("imprimir(2 * 3 + 1)"), vec!["7"]);
    assert_eq!(output_of("imprimir(10 - 12)"), vec!["-2"]);
    assert_eq!(output_of("imprimir(2 * 1.5)"), vec!["3.0"]);
    assert_eq!(output_of("imprimir(0.5 + 0.25)"), vec!["0.75"]);
}

#[test]
fn floats_always_show_a_decimal_point() {
    assert_eq!(output_of("imprimir(10000000000000000.0)"), vec!["1.0e16"]);
    assert_eq!(output_of("imprimir(0.00001)"), vec!["1.0e-5"]);
    assert_eq!(output_of("imprimir(1 / 4)"), vec!["0.25"]);
    assert_eq!(output_of("declarar m = [[0.00001, 2]]\nimprimir(m)"),
               vec!["Matrix 1 x 2\n[[1.0e-5, 2.0]]"]);
}

#[test]
fn operators_are_left_associative() {
    assert_eq!(output_of("imprimir(10 - 4 - 3)"), vec!["3"]);
    assert_eq!(output_of("imprimir(2 + 3 * 4)"), vec!["14"]);
    assert_eq!(output_of("imprimir((2 + 3) * 4)"), vec!["20"]);
    assert_eq!(output_of("imprimir(8 / 4 / 2)"), vec!["1.0"]);
}

#[test]
fn division_always_yields_float() {
    assert_eq!(output_of("imprimir(6 / 3)"), vec!["2.0"]);
    assert_eq!(output_of("imprimir(7 / 2)"), vec!["3.5"]);
}

#[test]
fn division_by_zero_binds_nothing() {
    let (error, _, context) = single_error("declarar y = 1 / 0");
    assert_eq!(error, RuntimeError::DivisionByZero { line: 1 });
    assert_eq!(error.kind(), ErrorKind::Arithmetic);
    assert!(!context.environment().contains("y"));

    let (error, _, context) = single_error("declarar y = 4\ny = 1 / 0.0");
    assert_eq!(error.kind(), ErrorKind::Arithmetic);
    let y = context.environment().get("y").cloned();
    assert_eq!(y.map(|v| v.to_string()), Some("4".to_string()));
}

#[test]
fn unknown_variable_prints_invalid_value() {
    let (error, transcript, _) = single_error("declarar a = 1\n\nimprimir(b)");
    assert_eq!(error,
               RuntimeError::UnknownVariable { name: "b".to_string(),
                                               line: 3, });
    assert_eq!(error.kind(), ErrorKind::UndefinedReference);
    assert_eq!(transcript.output, vec![INVALID_PRINT]);
}

#[test]
fn later_statements_run_after_a_failure() {
    let (error, transcript, context) = single_error("declarar x = q\ndeclarar y = 2\nimprimir(y)");
    assert_eq!(error.line(), 1);
    assert_eq!(transcript.output, vec!["2"]);
    assert!(!context.environment().contains("x"));
}

#[test]
fn first_failing_operand_is_reported() {
    let (error, ..) = single_error("declarar x = q + 1 / 0");
    assert_eq!(error.kind(), ErrorKind::UndefinedReference);

    let (error, ..) = single_error("imprimir(producto(q, 1 / 0))");
    assert_eq!(error.kind(), ErrorKind::UndefinedReference);
}

#[test]
fn ragged_matrix_literal_is_rejected() {
    let (error, _, context) = single_error("declarar r = [[1, 2], [3]]");
    assert_eq!(error,
               RuntimeError::RaggedMatrixLiteral { row:      1,
                                                   expected: 2,
                                                   found:    1,
                                                   line:     1, });
    assert_eq!(error.kind(), ErrorKind::MalformedLiteral);
    assert!(context.environment().is_empty());
}

#[test]
fn matrix_literal_type_is_promoted() {
    assert_eq!(output_of("imprimir([[1, 2], [3, 4]])"),
               vec!["Matrix 2 x 2\n[[1, 2], [3, 4]]"]);
    assert_eq!(output_of("imprimir([[1, 2.5], [-3, 4]])"),
               vec!["Matrix 2 x 2\n[[1.0, 2.5], [-3.0, 4.0]]"]);
}

#[test]
fn annotated_zero_matrix() {
    let (transcript, context) = run("declarar x: matriz<entero>[2,3]\nimprimir(x)");
    assert!(transcript.diagnostics.is_empty());
    assert_eq!(transcript.output, vec!["Matrix 2 x 3\n[[0, 0, 0], [0, 0, 0]]"]);

    let Some(Value::Matrix(x)) = context.environment().get("x") else {
        panic!("x is not a matrix");
    };
    assert_eq!(x.shape(), (2, 3));
    assert_eq!(x.element_type(), ElementType::Integer);
    assert!(x.data().iter().all(|&cell| cell == 0.0));
}

#[test]
fn oversized_matrix_declaration_is_reported() {
    let (error, transcript, context) =
        single_error("declarar m: matriz<entero>[4294967296, 4294967296]\nimprimir(1)");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(error.line(), 1);
    assert_eq!(transcript.output, vec!["1"]);
    assert!(!context.environment().contains("m"));

    let (error, _, _) = single_error("declarar m: matriz<flotante>[100000, 100000]");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn oversized_matrix_product_is_reported() {
    let (error, transcript, _) = single_error("declarar a: matriz<entero>[8192, 1]\n\
                                               declarar b: matriz<entero>[1, 4096]\n\
                                               imprimir(a @ b)");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(error.line(), 3);
    assert_eq!(transcript.output, vec![INVALID_PRINT]);
}

#[test]
fn integer_matrix_widens_to_float_declaration() {
    let (transcript, context) = run("declarar x: matriz<flotante>[2,2] = [[1,2],[3,4]]\nimprimir(x)");
    assert!(transcript.diagnostics.is_empty());
    assert_eq!(transcript.output, vec!["Matrix 2 x 2\n[[1.0, 2.0], [3.0, 4.0]]"]);

    let Some(Value::Matrix(x)) = context.environment().get("x") else {
        panic!("x is not a matrix");
    };
    assert_eq!(x.element_type(), ElementType::Float);
    assert_eq!(x.data(), &[1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn float_matrix_does_not_narrow_to_integer_declaration() {
    let (error, _, context) = single_error("declarar m: matriz<entero>[1,2] = [[1.5, 2]]");
    assert_eq!(error.kind(), ErrorKind::TypeIncompatibility);
    assert!(error.to_string().contains("'m'"));
    assert!(!context.environment().contains("m"));
}

#[test]
fn declared_matrix_shape_must_match() {
    let (error, _, context) = single_error("declarar m: matriz<entero>[2,2] = [[1, 2, 3]]");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert!(error.to_string().contains("'m'"));
    assert!(!context.environment().contains("m"));
}

#[test]
fn annotated_scalars() {
    assert_eq!(output_of("declarar a: entero = 2.5\nimprimir(a)"), vec!["3"]);
    assert_eq!(output_of("declarar a: entero = -2.5\nimprimir(a)"), vec!["-2"]);
    assert_eq!(output_of("declarar f: flotante = 2\nimprimir(f)"), vec!["2.0"]);
    assert_eq!(output_of("declarar e: entero\nimprimir(e)"), vec!["0"]);
    assert_eq!(output_of("declarar g: flotante\nimprimir(g)"), vec!["0.0"]);
    assert_eq!(output_of("declarar z: entero = -0.4\nimprimir(z)"), vec!["0"]);
}

#[test]
fn annotated_scalar_rejects_matrix() {
    let (error, _, context) = single_error("declarar s: entero = [[1]]");
    assert_eq!(error.kind(), ErrorKind::TypeIncompatibility);
    assert!(error.to_string().contains("'s'"));
    assert!(context.environment().is_empty());

    let (error, ..) = single_error("declarar m: matriz<entero>[1, 1] = 4");
    assert_eq!(error.kind(), ErrorKind::TypeIncompatibility);
}

#[test]
fn reassigning_integer_scalar_with_float_takes_new_type() {
    let (transcript, context) = run("declarar x: entero = 3\nx = 2.5\nimprimir(x)");
    assert!(transcript.diagnostics.is_empty());
    assert_eq!(transcript.output, vec!["2.5"]);
    assert_eq!(context.environment().get("x").map(Value::element_type),
               Some(ElementType::Float));
}

#[test]
fn assignment_to_unbound_name_binds_it() {
    assert_eq!(output_of("w = [[1, 2]]\nimprimir(w)"), vec!["Matrix 1 x 2\n[[1, 2]]"]);
}

#[test]
fn matrix_assignment_keeps_shape() {
    let (error, transcript, _) = single_error("declarar m = [[1, 2]]\nm = [[1], [2]]\nimprimir(m)");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(error.line(), 2);
    assert_eq!(transcript.output, vec!["Matrix 1 x 2\n[[1, 2]]"]);

    assert_eq!(output_of("declarar m = [[1, 2]]\nm = [[0.5, 1]]\nimprimir(m)"),
               vec!["Matrix 1 x 2\n[[0.5, 1.0]]"]);
}

#[test]
fn assignment_cannot_change_category() {
    let (error, _, context) = single_error("declarar s = 1\ns = [[1]]");
    assert_eq!(error.kind(), ErrorKind::TypeIncompatibility);
    assert!(matches!(context.environment().get("s"), Some(Value::Scalar(_))));

    let (error, _, context) = single_error("declarar m = [[1]]\nm = 1");
    assert_eq!(error.kind(), ErrorKind::TypeIncompatibility);
    assert!(matches!(context.environment().get("m"), Some(Value::Matrix(_))));
}

#[test]
fn mismatched_matrix_addition_leaves_bindings_untouched() {
    let src = "declarar a = [[1, 2]]\n\
               declarar b = [[1], [2]]\n\
               declarar c = [[9, 9]]\n\
               c = a + b\n\
               imprimir(c)\n\
               imprimir(a)";
    let (error, transcript, _) = single_error(src);
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert_eq!(transcript.output,
               vec!["Matrix 1 x 2\n[[9, 9]]", "Matrix 1 x 2\n[[1, 2]]"]);

    let (error, ..) = single_error("imprimir([[1, 2]] - [[1], [2]])");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
}

#[test]
fn elementwise_matrix_arithmetic() {
    assert_eq!(output_of("imprimir([[1, 2], [3, 4]] + [[0.5, 0], [0, 0.5]])"),
               vec!["Matrix 2 x 2\n[[1.5, 2.0], [3.0, 4.5]]"]);
    assert_eq!(output_of("imprimir([[5, 5]] - [[1, 2]])"), vec!["Matrix 1 x 2\n[[4, 3]]"]);
}

#[test]
fn scaling_works_from_both_sides() {
    assert_eq!(output_of("imprimir(2 * [[1, 2]])"), vec!["Matrix 1 x 2\n[[2, 4]]"]);
    assert_eq!(output_of("imprimir([[1, 3]] * 0.5)"), vec!["Matrix 1 x 2\n[[0.5, 1.5]]"]);
    assert_eq!(output_of("declarar m = [[1, 2], [3, 4]]\nimprimir(m * 3)\nimprimir(3 * m)"),
               output_of("declarar m = [[1, 2], [3, 4]]\nimprimir(3 * m)\nimprimir(m * 3)"));
}

#[test]
fn matrix_product() {
    let src = "declarar a = [[1, 2, 3], [4, 5, 6]]\n\
               declarar b = [[7, 8], [9, 10], [11, 12]]\n\
               imprimir(a @ b)";
    assert_eq!(output_of(src), vec!["Matrix 2 x 2\n[[58, 64], [139, 154]]"]);

    let (error, ..) = single_error("declarar a = [[1, 2]]\nimprimir(a @ a)");
    assert_eq!(error.kind(), ErrorKind::DimensionMismatch);
    assert!(error.to_string().contains("1x2 and 1x2"));
}

#[test]
fn producto_matches_matmul_operator() {
    let prelude = "declarar a = [[1, 2], [3, 4]]\ndeclarar b = [[0.5], [2]]\n";
    assert_eq!(output_of(&format!("{prelude}imprimir(producto(a, b))")),
               output_of(&format!("{prelude}imprimir(a @ b)")));
    assert_eq!(output_of(&format!("{prelude}imprimir(producto(a, a @ a))")),
               output_of(&format!("{prelude}imprimir(a @ (a @ a))")));
}

#[test]
fn invalid_operand_combinations_are_type_errors() {
    for src in ["imprimir(1 + [[1]])",
                "imprimir([[1]] - 1)",
                "imprimir([[1]] / 2)",
                "imprimir(2 / [[1]])",
                "imprimir([[1]] * [[1]])",
                "imprimir(2 @ 3)",
                "imprimir(producto(2, [[1]]))",
                "imprimir(-[[1]])"]
    {
        let (error, transcript, _) = single_error(src);
        assert_eq!(error.kind(), ErrorKind::TypeIncompatibility, "{src}");
        assert_eq!(transcript.output, vec![INVALID_PRINT], "{src}");
    }
}

#[test]
fn negation() {
    assert_eq!(output_of("declarar x = 4\nimprimir(-x)"), vec!["-4"]);
    assert_eq!(output_of("imprimir(-(1.5 - 2))"), vec!["0.5"]);
}

#[test]
fn lookups_do_not_alias() {
    let src = "declarar a = [[1, 2]]\n\
               declarar b = a\n\
               b = b + [[1, 1]]\n\
               imprimir(a)\n\
               imprimir(b)";
    assert_eq!(output_of(src),
               vec!["Matrix 1 x 2\n[[1, 2]]", "Matrix 1 x 2\n[[2, 3]]"]);
}

#[test]
fn redeclaration_replaces_binding() {
    assert_eq!(output_of("declarar x = [[1]]\ndeclarar x = 2\nimprimir(x)"), vec!["2"]);
}

#[test]
fn keywords_ignore_case_and_comments_are_skipped() {
    let src = "-- a comment\n\
               DECLARAR x: Entero = 1 -- trailing\n\
               Imprimir(x); declarar m: MATRIX<flotante>[1, 1]\n\
               imprimir(m)";
    assert_eq!(output_of(src), vec!["1", "Matrix 1 x 1\n[[0.0]]"]);
}

#[test]
fn statements_separated_by_semicolons() {
    assert_eq!(output_of("declarar x = 1; x = x + 1; imprimir(x);"), vec!["2"]);
}

#[test]
fn blocked_configuration_gives_same_results() {
    let src = "declarar a = [[1.5, 2, 3], [4, 5, 6.25]]\n\
               declarar b = [[7, 8], [9, 10], [11, 12]]\n\
               imprimir(a @ b)\n\
               imprimir(producto(b, a))";
    let (naive, _) = run(src);
    for tile in [1, 2, 3, 32] {
        let tile_size = NonZeroUsize::new(tile).unwrap();
        let (tiled, _) = run_with(src, EvalConfig::new(true, tile_size));
        assert_eq!(naive, tiled, "tile size {tile}");
    }
}

#[test]
fn parse_errors_stop_the_run() {
    assert_parse_failure("declarar x");
    assert_parse_failure("imprimir(1");
    assert_parse_failure("imprimir(1)\ndeclarar m: matriz<entero>[0, 2]");
    assert_parse_failure("x = 1 2");
    assert_parse_failure("declarar x = 1 $ 2");
    assert_parse_failure("declarar m = [[]]");
    assert_parse_failure("declarar m = []");
    assert_parse_failure("imprimir(producto(1))");
    assert_parse_failure("5 + 5");
}
