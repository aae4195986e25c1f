use zipper_delaunay::*;

fn main() {
    let points = vec![
        (0.0, 0.0).into(),
        (0.0, 1.0).into(),
        (1.0, 0.0).into(),
        (1.0, 1.0).into(),
    ];

    let triangulation =
        triangulate(points, &TriangulationConfig::default()).expect("triangulate square");

    println!("{:?}", triangulation.points());
    println!("{:?}", triangulation.edges().collect::<Vec<_>>());
    println!("{:?}", triangulation.faces());
}
