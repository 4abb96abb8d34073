//! Demonstrates set operations with `BitVector`
#![allow(clippy::many_single_char_names)]

use smol_bitvec::BitVector;

fn show(name: &str, bits: &BitVector) {
    println!("{name}: {:?}", bits.iter_ones().collect::<Vec<_>>());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== BitVector Set Operations ===\n");

    let a = BitVector::new(16)?;
    let b = BitVector::new(16)?;

    // Populate A: {1, 2, 3, 5, 8}
    for i in [1, 2, 3, 5, 8] {
        a.set(i, true)?;
    }

    // Populate B: {2, 3, 5, 7, 11}
    for i in [2, 3, 5, 7, 11] {
        b.set(i, true)?;
    }

    show("Set A", &a);
    show("Set B", &b);
    println!();

    let union = a.or(&b)?;
    show("Union (A | B)", &union);
    println!("Expected: [1, 2, 3, 5, 7, 8, 11]\n");

    let intersection = a.and(&b)?;
    show("Intersection (A & B)", &intersection);
    println!("Expected: [2, 3, 5]\n");

    let symmetric = a.xor(&b)?;
    show("Symmetric difference (A ^ B)", &symmetric);
    println!("Expected: [1, 7, 8, 11]\n");

    let complement = a.not();
    show("Complement (!A)", &complement);
    println!();

    // Operators work on references
    let difference = &a & &!&b;
    show("Difference (A & !B)", &difference);
    println!("Expected: [1, 8]\n");

    println!("Is A & B a subset of A? {}", intersection.is_subset(&a)?);
    println!("Are A and !A disjoint? {}\n", a.is_disjoint(&complement)?);

    // Mismatched lengths are reported as errors
    let c = BitVector::new(32)?;
    if let Err(e) = a.and(&c) {
        println!("A & C fails: {e}");
    }

    Ok(())
}
