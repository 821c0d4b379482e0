//! Merkle tree construction and proof derivation tests

use merkletools::{
    build_levels, HashAlgorithm, HashFunction, MerkleTools, NodeHash, Proof, ProofPosition,
    ProofStep,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn tree_from(values: &[&str], algorithm: &str) -> MerkleTools {
    let mut tree = MerkleTools::new(algorithm).unwrap();
    tree.add_leaves(values, true).unwrap();
    tree.make_tree();
    tree
}

fn numbered_tree(count: usize) -> MerkleTools {
    let values: Vec<String> = (0..count).map(|i| format!("item-{}", i)).collect();
    let mut tree = MerkleTools::new("sha256").unwrap();
    tree.add_leaves(&values, true).unwrap();
    tree.make_tree();
    tree
}

#[test]
fn test_known_roots() {
    assert_eq!(
        tree_from(&["a", "b", "c"], "sha256").merkle_root().unwrap().to_hex(),
        "7075152d03a5cd92104887b476862778ec0c87be5c2fa1c0a90f87c49fad6eff"
    );
    assert_eq!(
        tree_from(&["a", "b", "c", "d", "e"], "sha256")
            .merkle_root()
            .unwrap()
            .to_hex(),
        "d71f8983ad4ee170f8129f1ebcdd7440be7798d8e1c80420bf11f1eced610dba"
    );
    assert_eq!(
        tree_from(&["1", "2", "3", "4", "5", "6", "7"], "sha512")
            .merkle_root()
            .unwrap()
            .to_hex(),
        "025a251da5ef374d09251c164295b6f1832dcaedbf6f2b09aeb18198a26ec3f2\
         ffe978b98b6297f167b06fb161a891216f71fa514949c4e63b2609520262acdf"
    );
}

#[rstest]
#[case("sha3_224", "04204e0b6d3e9809b39ed32f85855b35f18cc556ccb5ce7b6aea4fa6")]
#[case("sha3_256", "b940dc53d707e4d9dfe9300664c6bbc4ab0c9f045d74441bfeda030cedbdbcba")]
#[case(
    "sha3_384",
    "07cbd785b5238d4b2b297b4d9ca0cbba11b1567ea69f606c4a578cc73ae9c243\
     5a0ee7a2d197235a9e745d2e3249479b"
)]
#[case(
    "sha3_512",
    "4f85e87fac99b7fbbb8be1b2329bc7677be3f7507a632110f6471c35e8f1a882\
     65f2f5363cca5ba9c3120f1b219c99fa5c2875301de862363d038348c483af3f"
)]
#[case(
    "blake2b",
    "f149ffeeb473588bd01e368c64c66102d0756b3438e4fb18d4a6c8aeb9298c85\
     a9e8bf99684ff0c96328d076ab04b1b6fc6c2870ef2d88468c827d26bdfffe7f"
)]
#[case("blake2s", "8df89ad09556e4fbc51e0d156d3cf80494d0d98c783aa3ddb739fb854444dc36")]
#[case("sha1", "4a0b8c57a3505535f23424a368f51f47c485a395")]
#[case("md5", "165d958d53acf52dc5b23d5de7c0a48a")]
fn test_known_roots_other_algorithms(#[case] algorithm: &str, #[case] expected: &str) {
    let tree = tree_from(&["a", "b", "c"], algorithm);
    let root = tree.merkle_root().unwrap();
    assert_eq!(root.to_hex(), expected);

    let proof = tree.get_proof(2).unwrap();
    assert!(tree
        .validate_proof(&proof, tree.leaf(2).unwrap(), &root)
        .unwrap());
}

#[test]
fn test_single_leaf_root_is_leaf() {
    let tree = tree_from(&["a"], "sha256");
    let root = tree.merkle_root().unwrap();

    assert_eq!(&root, tree.leaf(0).unwrap());
    assert_eq!(
        root.to_hex(),
        "ca978112ca1bbdcafac231b39a23dc4da786eff8147c4e72b9807785afee48bb"
    );

    let proof = tree.get_proof(0).unwrap();
    assert!(proof.is_empty());
    assert!(tree.validate_proof(&proof, &root, &root).unwrap());
}

#[test]
fn test_zero_leaves_has_no_root_or_proof() {
    let mut tree = MerkleTools::new("sha256").unwrap();
    tree.make_tree();

    assert!(tree.merkle_root().is_none());
    for index in [0, 1, 100] {
        assert!(tree.get_proof(index).is_none());
    }
}

#[test]
fn test_out_of_range_index() {
    let tree = numbered_tree(4);
    assert!(tree.get_proof(4).is_none());
    assert!(tree.get_proof(usize::MAX).is_none());
}

#[test]
fn test_abc_scenario() {
    let tree = tree_from(&["a", "b", "c"], "sha256");
    let root = tree.merkle_root().unwrap();
    let proof = tree.get_proof(2).unwrap();
    let target = tree.leaf(2).unwrap();

    assert_eq!(
        target.to_hex(),
        "2e7d2c03a9507ae265ecf5b5356885a53393a2029d241394997265a1a25aefc6"
    );
    assert_eq!(
        proof,
        Proof::new(vec![ProofStep::left(
            NodeHash::from_hex("e5a01fee14e0ed5c48714f22180f25ad8365b53f9779f79dc4a3d7e93963f94a")
                .unwrap()
        )])
    );
    assert!(tree.validate_proof(&proof, target, &root).unwrap());

    // Same proof against a tree that committed "d" instead of "c"
    let other = tree_from(&["a", "b", "d"], "sha256");
    let other_root = other.merkle_root().unwrap();
    assert_eq!(
        other_root.to_hex(),
        "0bb7c25857171905bc12c104c57c65f693c82fa378d39dd951754d8264bea99f"
    );
    assert!(!tree.validate_proof(&proof, target, &other_root).unwrap());
    assert!(!other
        .validate_proof(&proof, other.leaf(2).unwrap(), &root)
        .unwrap());
}

#[test]
fn test_three_leaf_carry_shortens_proof() {
    let tree = numbered_tree(3);
    let levels = tree.levels().unwrap();
    let lengths: Vec<usize> = levels.iter().map(|level| level.len()).collect();
    assert_eq!(lengths, vec![3, 2, 1]);

    // Pairing the odd leaf with itself would need two steps
    assert_eq!(tree.get_proof(2).unwrap().len(), 1);
    assert_eq!(tree.get_proof(0).unwrap().len(), 2);
    assert_eq!(tree.get_proof(1).unwrap().len(), 2);
}

#[test]
fn test_five_leaves_consecutive_carries() {
    let tree = numbered_tree(5);
    let levels = tree.levels().unwrap();
    let lengths: Vec<usize> = levels.iter().map(|level| level.len()).collect();
    assert_eq!(lengths, vec![5, 3, 2, 1]);

    // Leaf 4 is carried twice, then paired at the top
    let proof = tree.get_proof(4).unwrap();
    assert_eq!(proof.steps(), &[ProofStep::left(levels[2][0].clone())]);

    let proof = tree.get_proof(0).unwrap();
    assert_eq!(
        proof.steps(),
        &[
            ProofStep::right(levels[0][1].clone()),
            ProofStep::right(levels[1][1].clone()),
            ProofStep::right(levels[2][1].clone()),
        ]
    );
}

#[test]
fn test_eleven_leaves_interleaved_carries() {
    let tree = numbered_tree(11);
    let levels = tree.levels().unwrap();
    let lengths: Vec<usize> = levels.iter().map(|level| level.len()).collect();
    assert_eq!(lengths, vec![11, 6, 3, 2, 1]);

    // Carried at levels 0 and 2, paired at levels 1 and 3
    let proof = tree.get_proof(10).unwrap();
    assert_eq!(
        proof.steps(),
        &[
            ProofStep::left(levels[1][4].clone()),
            ProofStep::left(levels[3][0].clone()),
        ]
    );

    let proof = tree.get_proof(8).unwrap();
    assert_eq!(
        proof.steps(),
        &[
            ProofStep::right(levels[0][9].clone()),
            ProofStep::right(levels[1][5].clone()),
            ProofStep::left(levels[3][0].clone()),
        ]
    );

    assert_eq!(tree.get_proof(0).unwrap().len(), 4);
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
#[case(7)]
#[case(8)]
#[case(11)]
#[case(16)]
#[case(33)]
fn test_every_leaf_validates(#[case] count: usize) {
    let tree = numbered_tree(count);
    let root = tree.merkle_root().unwrap();

    for index in 0..count {
        let proof = tree.get_proof(index).unwrap();
        let leaf = tree.leaf(index).unwrap();
        assert!(
            tree.validate_proof(&proof, leaf, &root).unwrap(),
            "leaf {} of {}",
            index,
            count
        );
    }
}

#[rstest]
#[case(2)]
#[case(5)]
#[case(11)]
fn test_level_lengths_halve(#[case] count: usize) {
    let tree = numbered_tree(count);
    let levels = tree.levels().unwrap();

    assert_eq!(levels[0].len(), count);
    for pair in levels.windows(2) {
        assert_eq!(pair[1].len(), (pair[0].len() + 1) / 2);
    }
    assert_eq!(levels.last().unwrap().len(), 1);
}

#[test]
fn test_build_is_idempotent() {
    let mut tree = numbered_tree(9);
    let first_levels = tree.levels().unwrap().to_vec();
    let first_root = tree.merkle_root();

    tree.make_tree();
    assert_eq!(tree.levels().unwrap(), first_levels.as_slice());
    assert_eq!(tree.merkle_root(), first_root);

    tree.build();
    assert_eq!(tree.merkle_root(), first_root);
}

#[test]
fn test_pure_builder_matches_tree() {
    let tree = numbered_tree(6);
    let levels = build_levels(tree.leaves(), &HashAlgorithm::Sha256);
    assert_eq!(levels.as_slice(), tree.levels().unwrap());
}

#[test]
fn test_tampered_sibling_fails() {
    let tree = numbered_tree(7);
    let root = tree.merkle_root().unwrap();

    for index in 0..tree.leaf_count() {
        let proof = tree.get_proof(index).unwrap();
        let leaf = tree.leaf(index).unwrap();

        for step_index in 0..proof.len() {
            for bit in [0u8, 3, 7] {
                let mut steps = proof.clone().into_steps();
                let mut bytes = steps[step_index].hash.clone().into_bytes();
                bytes[0] ^= 1 << bit;
                steps[step_index].hash = NodeHash::from(bytes);

                let tampered = Proof::new(steps);
                assert!(!tree.validate_proof(&tampered, leaf, &root).unwrap());
            }
        }
    }
}

#[test]
fn test_tampered_target_fails() {
    let tree = numbered_tree(7);
    let root = tree.merkle_root().unwrap();

    for index in 0..tree.leaf_count() {
        let proof = tree.get_proof(index).unwrap();
        let mut bytes = tree.leaf(index).unwrap().clone().into_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0x80;

        assert!(!tree.validate_proof(&proof, &bytes, &root).unwrap());
    }
}

#[test]
fn test_flipped_direction_fails() {
    let tree = numbered_tree(4);
    let root = tree.merkle_root().unwrap();
    let proof = tree.get_proof(1).unwrap();

    let flipped: Vec<ProofStep> = proof
        .iter()
        .map(|step| ProofStep {
            position: match step.position {
                ProofPosition::Left => ProofPosition::Right,
                ProofPosition::Right => ProofPosition::Left,
            },
            hash: step.hash.clone(),
        })
        .collect();

    assert!(!tree
        .validate_proof(&Proof::new(flipped), tree.leaf(1).unwrap(), &root)
        .unwrap());
}

#[test]
fn test_reset_restarts_indices() {
    let mut tree = tree_from(&["a", "b"], "sha256");
    let first = tree.leaf(0).cloned();

    tree.reset_tree();
    tree.add_leaf("z", true).unwrap();
    tree.make_tree();

    assert_eq!(tree.leaf_count(), 1);
    assert_ne!(tree.leaf(0).cloned(), first);
    assert_eq!(tree.merkle_root().unwrap(), HashAlgorithm::Sha256.digest(b"z"));
}

#[test]
fn test_precomputed_digest_leaves_match_hashed_leaves() {
    let hashed = tree_from(&["x", "y", "z"], "sha256");

    let mut verbatim = MerkleTools::new("sha256").unwrap();
    for value in ["x", "y", "z"] {
        verbatim
            .add_leaf(HashAlgorithm::Sha256.digest(value.as_bytes()), false)
            .unwrap();
    }
    verbatim.make_tree();

    assert_eq!(verbatim.merkle_root(), hashed.merkle_root());
}

#[test]
fn test_algorithms_produce_different_roots() {
    let roots: Vec<NodeHash> = HashAlgorithm::ALL
        .iter()
        .map(|algorithm| tree_from(&["a", "b", "c"], algorithm.as_str()).merkle_root().unwrap())
        .collect();

    for (algorithm, root) in HashAlgorithm::ALL.iter().zip(&roots) {
        assert_eq!(root.len(), algorithm.output_size());
    }
    assert_ne!(roots[0], roots[1]);
}
