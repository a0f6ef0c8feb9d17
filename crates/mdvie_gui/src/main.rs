//! Desktop editor binary entry point.

fn main() {
    let exit_code = run_and_report(mdvie_gui::run);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run_and_report<F, E>(runner: F) -> i32
where
    F: FnOnce() -> Result<(), E>,
    E: std::fmt::Display,
{
    match runner() {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("mdvie: {}", err);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::run_and_report;

    #[test]
    fn success_exits_zero() {
        assert_eq!(run_and_report(|| Ok::<(), &str>(())), 0);
    }

    #[test]
    fn failure_exits_non_zero() {
        assert_eq!(run_and_report(|| Err::<(), &str>("no display")), 1);
    }
}
