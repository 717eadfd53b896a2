//! Split a small template and print its segments and tokens.

use scriptlex::{Block, LexOptions, lex_document, render_tokens};

fn main() {
    let doc = b"<ul>\n<?php foreach ($items as $item): ?>\n  <li><?= $item ?></li>\n<?php endforeach; ?>\n</ul>\n";

    let blocks = match lex_document(doc, &LexOptions::default()) {
        Ok(blocks) => blocks,
        Err(e) => {
            eprintln!("lex error: {e}");
            return;
        }
    };

    for block in &blocks {
        match block {
            Block::Raw(segment) => {
                println!("RAW  {}", segment.text_in(doc).escape_ascii());
            }
            Block::Code { segment, tokens } => {
                println!("CODE at line {}", segment.start_line);
                print!("{}", render_tokens(doc, tokens));
            }
        }
    }
}
