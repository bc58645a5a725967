use wireup::application;
use wireup::strategy::{DiscoveryWiring, StaticWiring};

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    // create our application, configured from the environment and an optional wireup.json
    let mut application =
        application::create_default().expect("unable to create default application");

    // both strategies end up with the same reference components, but differ in how they get there
    application
        .run(&StaticWiring)
        .expect("error running static wiring");
    application
        .run(&DiscoveryWiring)
        .expect("error running discovery wiring");
}
