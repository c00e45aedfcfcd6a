pub(super) const HELP_TEXT: &str = "Usage:
    refactor [options] [symbol1] into [symbol2]

Options:
    -h, --help
        Display this help message

    --debug, --debug-by-line
        Debug information

    -c, --config=refactor.xml
        Path to the analysis engine configuration file. Defaults to the one found under the root

    -r, --root
        If running the tool globally you'll need to specify a project root. Defaults to cwd

    -m
        Do not look for unused code

    --threads=INT
        If greater than one, the engine will run analysis on multiple threads, speeding things up.
";
