fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    if handle_cli_flags(&raw) {
        return;
    }

    let args = match hn_comments::Args::parse(raw) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("error: {err:?}");
            std::process::exit(2);
        }
    };

    if let Err(err) = hn_comments::run(args) {
        eprintln!("error: {err:?}");
        std::process::exit(1);
    }
}

fn handle_cli_flags(args: &[String]) -> bool {
    let mut saw_flag = false;
    for arg in args {
        match arg.as_str() {
            "--version" | "-V" => {
                println!("hn-comments {}", hn_comments::VERSION);
                saw_flag = true;
            }
            "--help" | "-h" => {
                println!(
                    "hn-comments - Render a Hacker News thread for the terminal pager.\n\nUsage: hn-comments [OPTIONS] [FILE]\n\nReads the thread JSON from FILE, or stdin when FILE is absent or '-'.\n\n  --width,   -w N      Preferred comment width (0 follows the terminal)\n  --indent,  -i N      Columns of indentation per reply level\n  --config,  -c PATH   Read settings from PATH\n  --version, -V        Show version and exit\n  --help,    -h        Show this help message"
                );
                saw_flag = true;
            }
            _ => {}
        }
    }
    saw_flag
}
