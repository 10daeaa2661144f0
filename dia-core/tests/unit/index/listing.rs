use super::*;

fn sample() -> DependencyIndex {
    DependencyIndex::new()
        .with_image("face10", "chars/hero/face10.png")
        .with_image("face2", "chars/hero/face2.png")
        .with_image("bg", "backgrounds/sky.png")
        .with_image("logo", "logo.png")
}

#[test]
fn groups_by_path_segments_in_natural_order() {
    let tree = ListingTree::build(&sample());
    let labels: Vec<&str> = tree.roots().iter().map(|n| n.label.as_str()).collect();
    assert_eq!(labels, vec!["backgrounds", "chars", "logo.png"]);

    let hero = &tree.roots()[1].children[0];
    assert_eq!(hero.label, "hero");
    assert_eq!(hero.id, None);
    let faces: Vec<(&str, Option<&str>)> = hero
        .children
        .iter()
        .map(|n| (n.label.as_str(), n.id.as_deref()))
        .collect();
    assert_eq!(
        faces,
        vec![("face2.png", Some("face2")), ("face10.png", Some("face10"))]
    );
}

#[test]
fn first_id_is_first_leaf_in_display_order() {
    let tree = ListingTree::build(&sample());
    assert_eq!(tree.first_id(), Some("bg"));
    assert_eq!(ListingTree::build(&DependencyIndex::new()).first_id(), None);
}

#[test]
fn walk_is_depth_first() {
    let tree = ListingTree::build(&DependencyIndex::new().with_image("x", "a/b.png"));
    let seen: Vec<(usize, &str)> = tree
        .walk()
        .into_iter()
        .map(|(d, n)| (d, n.label.as_str()))
        .collect();
    assert_eq!(seen, vec![(0, "a"), (1, "b.png")]);
}
