use cipherbreak::cipher::CipherKey;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

/// Renders the recovered key as two 13-column blocks of plain/cipher rows.
pub fn print_key_table(key: &CipherKey) {
    println!("\nRecovered key (plain -> cipher):");

    let pairs: Vec<(char, char)> = key.pairs().collect();
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for half in pairs.chunks(13) {
        let plain_row: Vec<Cell> = half
            .iter()
            .map(|(plain, _)| {
                Cell::new(plain.to_string())
                    .add_attribute(Attribute::Bold)
                    .set_alignment(CellAlignment::Center)
            })
            .collect();
        let cipher_row: Vec<Cell> = half
            .iter()
            .map(|(_, cipher)| {
                Cell::new(cipher.to_string()).set_alignment(CellAlignment::Center)
            })
            .collect();
        table.add_row(plain_row);
        table.add_row(cipher_row);
    }

    println!("{}", table);
}
