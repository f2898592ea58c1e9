use agora::{
    BitVector, NetworkRegistry, NodeId, NodeState, RepairSession,
};

fn main() {
    println!("═══════════════════════════════════════════════════════");
    println!("  Agora — Distributed-Systems Teaching Kernel Demo");
    println!("═══════════════════════════════════════════════════════");
    println!();

    bitflip_demo();
    println!();
    ownership_demo();
}

/// Detect and patch a single flipped bit, then commit.
fn bitflip_demo() {
    println!("  Puzzle 1: bit-flip patrol");

    let expected = BitVector::from_bit_string("expected", "10110010").unwrap();
    let mut received = BitVector::from_bit_string("received", "10110010").unwrap();
    received.flip(5).unwrap();

    let mut session = RepairSession::new(&expected, &received).unwrap();
    println!("    received: {}", session.inspect());
    println!("    diff:     {:?}", session.diff().unwrap());

    session.flip_bit(5).unwrap();
    let committed = session.commit().unwrap();
    println!("    patched:  {}", session.inspect());
    println!("    commit:   {} → {}", committed, session.status());
}

/// Two nodes independently claim the same coin; the registry sees it.
fn ownership_demo() {
    println!("  Puzzle 2: ownership conflict");

    let mut registry = NetworkRegistry::new();
    let mut alice = NodeState::new(NodeId::new("Alice"));
    alice.claim_ownership("Coin1");
    let mut bob = NodeState::new(NodeId::new("Bob"));
    bob.claim_ownership("Coin1");
    registry.add_node(alice);
    registry.add_node(bob);

    for (item, claimants) in registry.detect_ownership_conflicts() {
        println!("    conflict on {}:", item);
        for claim in claimants {
            println!(
                "      {} claims {} owns {}",
                claim.claimant, claim.claimed_owner, item
            );
        }
    }
    println!("    Who actually owns Coin1? Detection alone cannot say —");
    println!("    resolving it takes a consensus mechanism.");
}
