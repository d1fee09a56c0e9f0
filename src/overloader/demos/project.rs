use std::error::Error;
use std::sync::Arc;

use overloader::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let types = Arc::new(TypeRegistry::init(AppModule).unwrap());
    let services = Arc::new(ServiceMap::new().with_service("greeting", "Hello"));

    let config = ConfigLoader::new()
        .load_from_str("paths = [\"Project\", \"Library\"]\nverbose_load = true")
        .unwrap();
    let registry = LoaderRegistry::new();
    let loader = OverloaderFactory::new(config).create_in(&registry, services.clone(), types);
    loader.set_resolver(ContainerResolver);

    let logger = loader.service_factory("Logger", Arguments::new()).unwrap();
    services.set_factory("logger", logger);

    let greeter = loader.create("Greeter").unwrap();
    greeter.downcast_ref::<Greeter>().unwrap().greet("world");

    let page = loader.create("page").unwrap();
    page.downcast_ref::<Page>().unwrap().render();

    let models = loader.create_sub_scope("Model");
    println!("models are searched under {:?}", models.prefixes());
}

struct AppModule;

impl Module for AppModule {
    fn configure(
        &self,
        configurer: &mut dyn Configurer,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        class("Library\\Logger")
            .constructed_by(|_| Ok::<_, ArgumentError>(Logger))
            .set_on(configurer);

        class("Library\\Greeter")
            .param(Parameter::new("greeting").typed(ParamType::String))
            .constructed_by(|mut args: ResolvedArguments| {
                Ok::<_, ArgumentError>(Greeter {
                    greeting: args.take(0)?,
                    punctuation: ".",
                })
            })
            .set_on(configurer);

        // The project overloads the library's greeter.
        class("Project\\Greeter")
            .extends("Library\\Greeter")
            .param(Parameter::new("greeting").typed(ParamType::String))
            .constructed_by(|mut args: ResolvedArguments| {
                Ok::<_, ArgumentError>(Greeter {
                    greeting: args.take(0)?,
                    punctuation: "!",
                })
            })
            .set_on(configurer);

        class("Library\\Page")
            .constructed_by(|_| Ok::<_, ArgumentError>(Page::default()))
            .set_on(configurer);

        Ok(())
    }
}

struct Logger;

impl Component for Logger {}

impl Logger {
    fn log(&self, message: &str) {
        println!("[log] {message}");
    }
}

struct Greeter {
    greeting: String,
    punctuation: &'static str,
}

impl Component for Greeter {}

impl Greeter {
    fn greet(&self, name: &str) {
        println!("{}, {name}{}", self.greeting, self.punctuation);
    }
}

#[derive(Target, Default)]
#[target(after = ready)]
struct Page {
    #[target(required)]
    logger: Option<Object>,
    loader: Option<Overloader>,
}

impl Page {
    fn ready(&mut self) {
        self.log("page is ready");
    }

    fn render(&self) {
        let prefixes = self.loader.as_ref().map(Overloader::prefixes).unwrap_or_default();
        self.log(&format!("rendering with loader prefixes {prefixes:?}"));
    }

    fn log(&self, message: &str) {
        if let Some(logger) = self.logger.as_ref().and_then(|l| l.downcast_ref::<Logger>()) {
            logger.log(message);
        }
    }
}
