use tracing_subscriber::fmt::SubscriberBuilder;
use zipper_delaunay::*;

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();

    let points = vec![
        (0.0, 0.0).into(),
        (0.5, 2.0).into(),
        (1.0, 0.5).into(),
        (2.0, 1.5).into(),
        (2.5, 0.2).into(),
        (3.0, 2.2).into(),
        (4.0, 1.0).into(),
    ];

    let triangulation = triangulate(points, &TriangulationConfig::default())?;

    for (a, b) in triangulation.segments() {
        println!("{a} - {b}");
    }
    for face in triangulation.faces() {
        println!("{:?}", triangulation.realize_face(&face));
    }

    Ok(())
}
