use stdidx::{Config, OutputTarget};

use crate::cli::terminal::Colorize;

/// Suggested prompt for an agent consuming the standards tree.
const AGENT_INSTRUCTIONS: &str = "\
When working on a task, consult the standards tree in {output}
to find applicable coding standards.

1. Always start at the root nodes. Read any root node whose scope
   matches the files you're working with or whose scope is \"*\".

2. For each node you read, check its children. Descend into a child
   if its scope or topics match your current context.

3. Stop descending a branch when no children match your context.

4. Collect all matching nodes from root to leaf. Standards at every
   level in the path apply. A child does not replace its parent,
   it adds to it.

5. If a child standard contradicts a parent, the child takes precedence.

To determine if a node matches your context:
- description: compare the description of the node to the task you're working on
- scope: compare against the file extensions you're editing
  (\"*.py\", \"*.ts\", \"*\" matches everything)
- topics: compare against the project's detected frameworks/tools
  (e.g. if package.json has \"react\" as a dependency, the \"react\"
  topic matches)";

#[derive(Debug, clap::Parser)]
pub struct Instructions {}

impl Instructions {
    pub fn run(self, config: &Config) {
        let target = OutputTarget::from(config.output.clone());
        println!("{}", agent_instructions(&target.to_string()));
    }
}

fn agent_instructions(output: &str) -> String {
    AGENT_INSTRUCTIONS.replace("{output}", output)
}

pub fn print_suggestion(target: &OutputTarget) {
    println!();
    println!(
        "{}",
        "Don't forget to instruct your agent to use the standards index. Suggested prompt:".info()
    );
    println!();
    println!("{}", agent_instructions(&target.to_string()).dim());
    println!();
}
