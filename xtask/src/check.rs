use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;
use std::time::Instant;

/// A cargo invocation and whether its failure fails the whole check.
struct Step {
    label: &'static str,
    args: &'static [&'static str],
    fatal: bool,
}

const STEPS: &[Step] = &[
    Step {
        label: "frames (host, all features)",
        args: &["check", "-p", "frames", "--all-features", "--all-targets"],
        fatal: true,
    },
    // The library must keep building without std.
    Step {
        label: "frames (no_std, thumbv7em-none-eabihf)",
        args: &[
            "check",
            "-p",
            "frames",
            "--no-default-features",
            "--target",
            "thumbv7em-none-eabihf",
        ],
        fatal: true,
    },
    Step {
        label: "rustdoc",
        args: &["doc", "-p", "frames", "--all-features", "--no-deps"],
        fatal: true,
    },
    // Doctests against the alloc-only build catch stray std imports in examples.
    Step {
        label: "doctests (no_std)",
        args: &["test", "-p", "frames", "--doc", "--no-default-features"],
        fatal: true,
    },
    Step {
        label: "xtask",
        args: &["check", "-p", "xtask"],
        fatal: true,
    },
    Step {
        label: "clippy lints",
        args: &["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"],
        fatal: false,
    },
    Step {
        label: "code formatting",
        args: &["fmt", "--all", "--check"],
        fatal: false,
    },
];

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let total_start = Instant::now();
    for step in STEPS {
        run_step(step)?;
    }

    println!(
        "{}",
        format!(
            "✓ All checks completed in {:.2}s",
            total_start.elapsed().as_secs_f64()
        )
        .green()
        .bold()
    );
    println!();

    Ok(())
}

fn run_step(step: &Step) -> Result<()> {
    println!("{}", format!("  Checking {}...", step.label).cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(step.args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", step.args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!(
                "  ✓ {} passed in {:.2}s",
                step.label,
                start.elapsed().as_secs_f64()
            )
            .green()
        );
    } else if step.fatal {
        eprintln!("{}", format!("  ✗ {} failed", step.label).red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{} failed", step.label);
    } else {
        // Lints and formatting are reported, not enforced.
        eprintln!("{}", format!("  ⚠ {} reported issues", step.label).yellow().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
    }
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documentation_is_part_of_the_check() {
        let doc = STEPS.iter().find(|step| step.args.first() == Some(&"doc")).unwrap();
        assert!(doc.fatal);
        assert!(doc.args.contains(&"frames"));
        assert!(STEPS
            .iter()
            .any(|step| step.args.contains(&"--doc") && step.args.contains(&"--no-default-features")));
    }

    #[test]
    fn only_lints_and_formatting_are_advisory() {
        let advisory: Vec<&str> = STEPS.iter().filter(|s| !s.fatal).map(|s| s.label).collect();
        assert_eq!(advisory, ["clippy lints", "code formatting"]);
    }
}
