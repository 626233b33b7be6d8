use std::{env, fs, path::PathBuf, process::Command};

const PERIOD_TABLE: &str = "time,mean\n\
31,12\n29,13\n31,14\n30,29\n31,32\n30,35\n\
31,33\n31,24\n30,18\n31,10\n30,8\n31,7\n";

fn run_bin(args: &[&str]) -> bool {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_mean-interp"));

    let output = Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command");

    if !output.status.success() {
        let stdout_str =
            std::str::from_utf8(&output.stdout).expect("failed to convert stdout to string");
        let stderr_str =
            std::str::from_utf8(&output.stderr).expect("failed to convert stderr to string");
        eprintln!("binary failed with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n");
    }
    output.status.success()
}

fn count_rows(path: &PathBuf) -> usize {
    let contents = fs::read_to_string(path).expect("failed to read output");
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("mean_interpolated"));
    lines.count()
}

#[test]
fn basic_workflow() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("basic_workflow");

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir_all(test_dir.join("tables")).expect("failed to create test directory");

    let input = test_dir.join("tables").join("monthly.csv");
    fs::write(&input, PERIOD_TABLE).expect("failed to write period table");
    fs::write(test_dir.join("tables").join("flat.csv"), "time,mean\n3,1\n4,1.0\n")
        .expect("failed to write period table");

    let config = test_dir.join("config.toml");
    let config_contents = String::new()
        + "[method]\n"
        + "kind = \"spline\"\n"
        + "max_iter = 100\n"
        + "tol = 0.01\n"
        + "\n"
        + "[verify]\n"
        + "tol = 0.01\n";
    fs::write(&config, config_contents).expect("failed to write config file");

    let bounded = test_dir.join("bounded.toml");
    let bounded_contents = String::new()
        + "[method]\n"
        + "kind = \"autoregressive\"\n"
        + "min_val = 0.0\n"
        + "max_val = 40.0\n";
    fs::write(&bounded, bounded_contents).expect("failed to write config file");

    let path_str = |path: &PathBuf| {
        path.to_str()
            .expect("failed to convert path to string")
            .to_string()
    };
    let input_str = path_str(&input);
    let config_str = path_str(&config);
    let bounded_str = path_str(&bounded);
    let output_str = path_str(&test_dir.join("daily.csv"));
    let bounded_output_str = path_str(&test_dir.join("daily-bounded.csv"));
    let tables_str = path_str(&test_dir.join("tables"));
    let batch_str = path_str(&test_dir.join("batch"));

    assert!(run_bin(&[
        "interpolate",
        "--input",
        &input_str,
        "--output",
        &output_str,
    ]));
    assert_eq!(count_rows(&test_dir.join("daily.csv")), 366);

    assert!(run_bin(&[
        "--config",
        &config_str,
        "interpolate",
        "--input",
        &input_str,
        "--output",
        &output_str,
    ]));
    assert!(run_bin(&[
        "--config",
        &config_str,
        "verify",
        "--input",
        &input_str,
        "--output",
        &output_str,
    ]));

    assert!(run_bin(&[
        "--config",
        &bounded_str,
        "interpolate",
        "--input",
        &input_str,
        "--output",
        &bounded_output_str,
    ]));
    assert!(run_bin(&[
        "verify",
        "--input",
        &input_str,
        "--output",
        &bounded_output_str,
    ]));

    assert!(run_bin(&[
        "batch",
        "--input-dir",
        &tables_str,
        "--output-dir",
        &batch_str,
    ]));
    assert_eq!(count_rows(&test_dir.join("batch").join("monthly.csv")), 366);
    assert_eq!(count_rows(&test_dir.join("batch").join("flat.csv")), 7);

    // A truncated output no longer matches the period means.
    let truncated = test_dir.join("truncated.csv");
    fs::write(&truncated, "mean_interpolated\n1.0\n2.0\n").expect("failed to write table");
    assert!(!run_bin(&[
        "verify",
        "--input",
        &input_str,
        "--output",
        &path_str(&truncated),
    ]));

    // NaN samples never pass verification.
    let flat_str = path_str(&test_dir.join("tables").join("flat.csv"));
    let nan = test_dir.join("nan.csv");
    fs::write(&nan, "mean_interpolated\n".to_string() + &"NaN\n".repeat(7))
        .expect("failed to write table");
    assert!(!run_bin(&[
        "verify",
        "--input",
        &flat_str,
        "--output",
        &path_str(&nan),
    ]));

    // Fractional period lengths are rejected.
    let fractional = test_dir.join("fractional.csv");
    fs::write(&fractional, "time,mean\n2.5,1\n3,2\n").expect("failed to write table");
    assert!(!run_bin(&[
        "interpolate",
        "--input",
        &path_str(&fractional),
        "--output",
        &output_str,
    ]));

    // Period lengths too large to expand are rejected.
    let huge = test_dir.join("huge.csv");
    fs::write(&huge, "time,mean\n1e30,1\n3,2\n").expect("failed to write table");
    assert!(!run_bin(&[
        "interpolate",
        "--input",
        &path_str(&huge),
        "--output",
        &output_str,
    ]));

    fs::remove_dir_all(&test_dir).ok();
}
