//! Debug/inspection primitives: `.s`, `.w`, `.d`.

use super::PrimitiveEntry;
use crate::dictionary::CELL_SIZE;
use crate::engine::Engine;
use crate::error::ForthError;

/// `.s` — print the parameter stack, bottom to top.
fn dot_s(e: &mut Engine) -> Result<(), ForthError> {
    let items: Vec<String> = e.params.iter_bottom_up().map(|v| v.to_string()).collect();
    println!("<{}> {}", items.len(), items.join(" "));
    Ok(())
}

/// `.w` — list defined word names, most recent first.
fn dot_w(e: &mut Engine) -> Result<(), ForthError> {
    let names: Vec<String> = e.dict.iter_records().map(|r| e.dict.name_of(r)).collect();
    println!("{}", names.join(" "));
    Ok(())
}

/// `.d` — dump every word: name, record address, codeword address, and,
/// for colon words, the body's codeword-reference cells up to `exit`.
/// `lit`/`'`/`branch`/`0branch` each consume one extra inline cell, which
/// is printed as a bare literal rather than resolved as a reference.
fn dot_d(e: &mut Engine) -> Result<(), ForthError> {
    for record in e.dict.iter_records() {
        let name = e.dict.name_of(record);
        let codeword_addr = e.dict.codeword_addr(record);
        let codeword = e.dict.read_cell(codeword_addr);
        print!("{name} @{record} codeword@{codeword_addr}");
        if let Some(idx) = super::untag(codeword) {
            if idx == super::DOCOL_INDEX {
                print!(" body:");
                let mut cursor = codeword_addr + CELL_SIZE;
                loop {
                    let cell = e.dict.read_cell(cursor);
                    let callee_codeword = e.dict.read_cell(cell as usize);
                    match super::untag(callee_codeword) {
                        Some(callee_idx) => {
                            let callee_name = e.primitive_name(callee_idx);
                            print!(" {callee_name}");
                            cursor += CELL_SIZE;
                            if matches!(callee_name, "lit" | "'" | "branch" | "0branch") {
                                print!(" {}", e.dict.read_cell(cursor));
                                cursor += CELL_SIZE;
                            }
                            if callee_idx == super::EXIT_INDEX {
                                break;
                            }
                        }
                        None => {
                            print!(" <{cell}>");
                            break;
                        }
                    }
                }
            } else {
                print!(" primitive:{}", e.primitive_name(idx));
            }
        }
        println!();
    }
    Ok(())
}

pub fn entries() -> Vec<PrimitiveEntry> {
    vec![
        PrimitiveEntry::new(".s", false, "print the parameter stack, bottom to top", dot_s),
        PrimitiveEntry::new(".w", false, "list defined words, most recent first", dot_w),
        PrimitiveEntry::new(".d", false, "dump dictionary records", dot_d),
    ]
}
