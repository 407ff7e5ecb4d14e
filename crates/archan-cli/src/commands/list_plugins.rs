//! List plugins command implementation.

use archan_core::ArgumentSpec;

fn print_arguments(arguments: &[ArgumentSpec]) {
    for arg in arguments {
        let required = if arg.required { " (required)" } else { "" };
        println!("    {:<22} {}{required}", arg.name, arg.description);
    }
}

/// Runs the list-plugins command.
pub fn run() {
    let registry = super::registry();

    println!("Providers:\n");
    println!("{:<28} Description", "Identifier");
    println!("{}", "-".repeat(80));
    for provider in registry.all_providers() {
        println!("{:<28} {}", provider.identifier(), provider.description());
        print_arguments(provider.arguments());
    }

    println!("\nCheckers:\n");
    println!("{:<6} {:<32} Description", "Code", "Identifier");
    println!("{}", "-".repeat(80));
    for checker in registry.all_checkers() {
        println!(
            "{:<6} {:<32} {}",
            checker.codename(),
            checker.identifier(),
            checker.description()
        );
        print_arguments(checker.arguments());
    }

    println!("\nPlugins can be referenced by identifier, short name or codename, e.g.:");
    println!("  archan.CompleteMediation, CompleteMediation, CM");
}
