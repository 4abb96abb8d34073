//! Basic usage examples for `BitVector`

use smol_bitvec::{BitVector, BitVectorError};

fn main() -> Result<(), BitVectorError> {
    println!("=== BitVector Basic Usage ===\n");

    // Create a vector that fits in a single inline word
    let bits = BitVector::new(40)?;
    println!("Created {}-bit vector", bits.len());
    println!("Is using heap storage? {}\n", bits.is_spilled());

    // Set some bits
    for i in [5, 10, 15, 39] {
        bits.set(i, true)?;
    }
    println!("Set bits at positions: 5, 10, 15, 39");
    println!("Number of set bits: {}", bits.count_set_bits());
    println!("As string: {bits}\n");

    // Check if specific bits are set
    println!("Checking individual bits:");
    for i in [0, 5, 10, 20, 39] {
        println!(
            "  Bit {}: {}",
            i,
            if bits.get(i)? { "set" } else { "unset" }
        );
    }
    println!();

    // Out-of-range access is an error, not a panic
    match bits.get(40) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("Reading bit 40 fails: {e}\n"),
    }

    // Scan for set bits
    let mut pos = 0;
    print!("Set bits via next_set_bit:");
    while let Some(found) = bits.next_set_bit(pos)? {
        print!(" {found}");
        if found + 1 >= bits.len() {
            break;
        }
        pos = found + 1;
    }
    println!("\n");

    // Grow past the inline capacity
    let mut bits = bits;
    bits.resize(200)?;
    bits.set_range(100, 50, true)?;
    println!("Resized to {} bits", bits.len());
    println!("Is using heap storage? {}", bits.is_spilled());
    println!("Bits 100..150 all set? {}", bits.all_set(100, 50)?);
    println!("Number of set bits: {}\n", bits.count_set_bits());

    // Shifts and extraction return new vectors
    let shifted = bits.left_shift(3);
    println!("First set bit after left shift by 3: {:?}", shifted.first_set_bit());
    let window = bits.sub_array(0, 16)?;
    println!("First 16 bits: {window}");

    // Byte conversion
    println!("Bytes of the window: {:02x?}", window.to_bytes());

    Ok(())
}
