//driver: command line handling, the compile pipeline,
//the g++ invocation and the JSON result record on stdout

use std::env;
use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};
use std::time::Instant;

use console::style;
use serde::Serialize;

#[derive(Serialize)]
struct CompileErrorRecord {
    phase: String,
    message: String,
    line: u32,
    col: u32,
}

#[derive(Serialize)]
struct RunReport {
    success: bool,
    compile_errors: Vec<CompileErrorRecord>,
    stdout: String,
    stderr: String,
    exit_code: i32,
    time_ms: u64,
}

impl RunReport {
    fn success(stdout: String, stderr: String, time_ms: u64) -> Self {
        RunReport {
            success: true,
            compile_errors: Vec::new(),
            stdout,
            stderr,
            exit_code: 0,
            time_ms,
        }
    }

    fn failure(phase: &str, message: String, line: u32, col: u32) -> Self {
        RunReport {
            success: false,
            compile_errors: vec![CompileErrorRecord {
                phase: phase.to_string(),
                message,
                line,
                col,
            }],
            stdout: String::new(),
            stderr: String::new(),
            exit_code: 1,
            time_ms: 0,
        }
    }
}

fn print_report(report: &RunReport) {
    match serde_json::to_string_pretty(report) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to serialize the result record: {}", e),
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let mut file_path = None;
    let mut stdin_content = String::new();
    let mut run = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--run" => run = true,
            "--file" if i + 1 < args.len() => {
                i += 1;
                file_path = Some(args[i].clone());
            }
            "--stdin" if i + 1 < args.len() => {
                i += 1;
                stdin_content = args[i].clone();
            }
            _ => {}
        }
        i += 1;
    }

    let Some(file_path) = file_path else {
        eprintln!("Usage: tinylang-compiler --file <path> [--stdin <input>] [--run]");
        std::process::exit(1);
    };

    let source = match fs::read_to_string(&file_path) {
        Ok(source) => source,
        Err(_) => {
            print_report(&RunReport::failure(
                "file",
                format!("Could not open file: {}", file_path),
                0,
                0,
            ));
            return;
        }
    };

    let compiled = match tinylang::compile(&source) {
        Ok(compiled) => compiled,
        Err(err) => {
            let (line, col) = err.position();
            print_report(&RunReport::failure(
                err.phase(),
                err.message().to_string(),
                line,
                col,
            ));
            return;
        }
    };

    // warnings go to stderr so the stdout record stays machine-readable
    for warning in &compiled.warnings {
        eprintln!("{} {}", style("warning:").yellow().bold(), warning);
    }

    let cpp_path = env::temp_dir().join("tinylang_gen.cpp");
    let exe_path = env::temp_dir().join("tinylang_run");
    if let Err(e) = fs::write(&cpp_path, &compiled.cpp_source) {
        print_report(&RunReport::failure(
            "unknown",
            format!("Could not write generated source: {}", e),
            0,
            0,
        ));
        return;
    }

    let gcc = Command::new("g++")
        .arg("-O2")
        .arg("-std=c++20")
        .arg("-o")
        .arg(&exe_path)
        .arg(&cpp_path)
        .output();
    let gcc = match gcc {
        Ok(output) => output,
        Err(e) => {
            print_report(&RunReport::failure(
                "codegen",
                format!("Could not invoke g++: {}", e),
                0,
                0,
            ));
            return;
        }
    };
    if !gcc.status.success() {
        let mut diagnostics = String::from_utf8_lossy(&gcc.stderr).into_owned();
        diagnostics.push_str(&String::from_utf8_lossy(&gcc.stdout));
        print_report(&RunReport::failure(
            "codegen",
            format!("C++ compilation failed: {}", diagnostics),
            0,
            0,
        ));
        return;
    }

    if !run {
        print_report(&RunReport::success(String::new(), String::new(), 0));
        return;
    }

    let started = Instant::now();
    let child = Command::new(&exe_path)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn();
    let mut child = match child {
        Ok(child) => child,
        Err(e) => {
            print_report(&RunReport::failure(
                "runtime",
                format!("Could not start the compiled program: {}", e),
                0,
                0,
            ));
            return;
        }
    };
    if let Some(mut stdin) = child.stdin.take() {
        // the program may exit without draining its input
        let _ = stdin.write_all(stdin_content.as_bytes());
    }
    let output = match child.wait_with_output() {
        Ok(output) => output,
        Err(e) => {
            print_report(&RunReport::failure(
                "runtime",
                format!("Could not read the program output: {}", e),
                0,
                0,
            ));
            return;
        }
    };
    let time_ms = started.elapsed().as_millis() as u64;

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);

    if exit_code != 0 {
        let message = if stderr.is_empty() {
            format!("Program exited with code {}", exit_code)
        } else {
            stderr.clone()
        };
        print_report(&RunReport {
            success: false,
            compile_errors: vec![CompileErrorRecord {
                phase: "runtime".to_string(),
                message,
                line: 0,
                col: 0,
            }],
            stdout,
            stderr,
            exit_code,
            time_ms,
        });
    } else {
        print_report(&RunReport::success(stdout, stderr, time_ms));
    }
}
