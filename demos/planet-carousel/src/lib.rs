use wasm_bindgen::prelude::*;
use orrery_engine::*;

mod bodies;
mod builder;
mod driver;
mod game;
use game::PlanetCarousel;

orrery_web::export_showcase!(PlanetCarousel, "planet-carousel");
