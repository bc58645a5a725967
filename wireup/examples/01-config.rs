use std::fs;
use wireup::application::Application;
use wireup::config::ApplicationConfig;
use wireup::strategy::DynamicWiring;

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let directory = std::env::temp_dir().join("wireup-config-example");
    fs::create_dir_all(&directory).expect("error creating example directory");

    // the descriptor names the data provider first and the calculator second; aliases work as
    // well as full type names
    let descriptor_file = directory.join("config.txt");
    fs::write(&descriptor_file, "dao\nwireup::service::ScalingCalculator\n")
        .expect("error writing descriptor");

    // config can be changed in code, in addition to wireup.json and WIREUP_* variables
    let mut config = ApplicationConfig::default();
    config.descriptor_file = descriptor_file;

    let strategy = DynamicWiring::new(config.descriptor_file.clone());
    let mut application = Application::new(config, std::io::stdout());

    let result = application.run(&strategy).expect("error running application");
    assert!((0.0..100.0).contains(&result));
}
