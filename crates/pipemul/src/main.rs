use std::process;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use pipemul::{Operand, SelfSpawner, coordinator, run_worker};

#[tokio::main]
async fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    // Internal mode: we are the spawned worker. stdin carries requests,
    // stdout carries responses, logs go to stderr only.
    if args.get(1).map(String::as_str) == Some("--worker") {
        if let Err(e) = run_worker(tokio::io::stdin(), tokio::io::stdout()).await {
            eprintln!("error: worker channel failure: {e}");
            process::exit(1);
        }
        return;
    }

    let (num1, num2) = match parse_args(&args) {
        Ok(v) => v,
        Err(msg) => {
            eprintln!("error: {msg}");
            eprintln!();
            eprintln!("Usage: pipemul <num1> <num2>");
            eprintln!();
            eprintln!("Arguments:");
            eprintln!("  <num1>    First factor, a 4-digit integer (1000-9999)");
            eprintln!("  <num2>    Second factor, a 4-digit integer (1000-9999)");
            process::exit(1);
        }
    };

    if let Err(e) = run(num1, num2).await {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<(Operand, Operand), String> {
    if args.len() != 3 {
        return Err("expected exactly two 4-digit integers".to_string());
    }

    let parse = |arg: &String| -> Result<Operand, String> {
        let n: i32 = arg
            .parse()
            .map_err(|_| format!("'{arg}' is not a valid integer"))?;
        Operand::new(n).map_err(|e| e.to_string())
    };

    Ok((parse(&args[1])?, parse(&args[2])?))
}

async fn run(num1: Operand, num2: Operand) -> anyhow::Result<()> {
    tracing::info!(%num1, %num2, "Multiplying");

    let product = coordinator::multiply(num1, num2, &SelfSpawner)
        .await
        .context("multiplication failed")?;

    println!(
        "{}*{} == {} + {} + {} == {}",
        num1,
        num2,
        product.x,
        product.y,
        product.z,
        product.result()
    );

    Ok(())
}

fn init_tracing() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("pipemul=info")
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr));
    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        std::iter::once("pipemul")
            .chain(parts.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_valid_operands() {
        let (num1, num2) = parse_args(&args(&["1234", "5678"])).unwrap();
        assert_eq!(num1.value(), 1234);
        assert_eq!(num2.value(), 5678);
    }

    #[test]
    fn rejects_wrong_argument_count() {
        assert!(parse_args(&args(&[])).is_err());
        assert!(parse_args(&args(&["1234"])).is_err());
        assert!(parse_args(&args(&["1234", "5678", "9012"])).is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        let err = parse_args(&args(&["12x4", "5678"])).unwrap_err();
        assert!(err.contains("not a valid integer"));
    }

    #[test]
    fn rejects_out_of_range() {
        assert!(parse_args(&args(&["999", "5678"])).is_err());
        assert!(parse_args(&args(&["1234", "10000"])).is_err());
    }
}
