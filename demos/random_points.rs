use glam::DVec2;
use rand::Rng;
use rand_distr::Uniform;
use tracing_subscriber::fmt::SubscriberBuilder;
use zipper_delaunay::*;

const WIDTH: f64 = 800.0;
const HEIGHT: f64 = 600.0;
const COUNT: usize = 24;

fn main() {
    SubscriberBuilder::default().with_target(false).init();

    let mut rng = rand::thread_rng();
    let dist_w = Uniform::new(0.0, WIDTH);
    let dist_h = Uniform::new(0.0, HEIGHT);

    let mut points: Vec<DVec2> = (0..COUNT)
        .map(|_| DVec2::new(rng.sample(dist_w), rng.sample(dist_h)))
        .collect();
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    let triangulation = match triangulate(points, &TriangulationConfig::default()) {
        Ok(t) => t,
        Err(err) => {
            tracing::error!(%err, "triangulation failed");
            return;
        }
    };

    for (a, b) in triangulation.segments() {
        println!("({}, {}) ({}, {})", a.x, a.y, b.x, b.y);
    }
    println!(
        "{} edges, {} faces",
        triangulation.edges().count(),
        triangulation.faces().len()
    );
}
