//! Demonstrate lenient and strict handling of unterminated input.

use scriptlex::{LexOptions, tokenize_with};

fn main() {
    let src = b"echo 'unclosed;\n";

    // Lenient: the string runs to the end of input.
    match tokenize_with(src, &LexOptions::default()) {
        Ok(tokens) => println!("Lenient: {} token(s)", tokens.len()),
        Err(e) => println!("Lenient error (unexpected): {e}"),
    }

    println!();

    // Strict: the same input is an error with a location.
    match tokenize_with(src, &LexOptions::default().strict()) {
        Ok(_) => println!("Strict: lexed OK (unexpected)"),
        Err(e) => {
            println!("Lex error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, offset {}", e.line, e.offset);
        }
    }
}
