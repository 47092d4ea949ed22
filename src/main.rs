//! Simulated walk: drives the engine with synthetic pose and geolocation
//! streams and prints the transforms a renderer would read back.

use nalgebra::Vector3;

use geoanchor::algorithms::great_circle;
use geoanchor::{
    AnnotationContent, AnnotationNode, ContentId, DevicePose, GeoCoordinate, PixelSize,
    PlacementNode, PositioningEngine,
};

fn main() {
    env_logger::init();

    let mut engine = PositioningEngine::new();

    // First fix: a plaza, 8 m horizontal accuracy
    let start = GeoCoordinate::new(47.6205, -122.3493, 0).with_accuracy(8.0);
    engine.submit_pose(DevicePose::at(Vector3::zeros()));
    engine.submit_location(start.clone());

    // A billboarded label 40 m north and a bare placement marker 12 m east
    let label = AnnotationNode::new(
        Some(great_circle::destination(&start, 0.0, 40.0)),
        AnnotationContent::image(ContentId(1), PixelSize::new(420.0, 120.0)),
    )
    .with_tag("fountain");
    engine.add_annotation(label);

    let mut beacon = PlacementNode::new(None).with_tag("meet-here");
    beacon.relocate(great_circle::destination(
        &start,
        std::f64::consts::FRAC_PI_2,
        12.0,
    ));
    engine.add_placement(beacon);

    // Walk 30 m north over 60 frames; a sharper fix arrives halfway
    for frame in 0..60u32 {
        let z = -0.5 * f64::from(frame);
        engine.submit_pose(DevicePose::at(Vector3::new(0.0, 0.0, z)));

        if frame == 30 {
            let refined = engine
                .current_location()
                .expect("a fix was submitted before the walk began")
                .with_accuracy(3.0);
            engine.submit_location(refined);
        }

        engine.run_cycle();
    }

    for (id, node) in engine.nodes() {
        let placement = node.placement();
        let tag = placement.tag.as_deref().unwrap_or("-");
        match placement.transform() {
            Some(transform) => println!(
                "node {} [{}]: position ({:.2}, {:.2}, {:.2}) scale {:.3} confirmed {}",
                id.raw(),
                tag,
                transform.position.x,
                transform.position.y,
                transform.position.z,
                transform.scale,
                placement.location_confirmed(),
            ),
            None => println!("node {} [{}]: not yet placed", id.raw(), tag),
        }
    }
}
