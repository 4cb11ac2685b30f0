// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Walks a small object hierarchy through casts and traced calls, then dumps
//! the call stack of the innermost call.
//!
//! Usage: `quimera-sandbox [settings.json]`

use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use quimera_core::diagnosis::{CallStackTracer, LogPrinter, PlainTextFormatter, TracingSettings};
use quimera_core::rtti::{classify_value, registered_types};
use quimera_core::{trace_function, trace_method_with_state, Object, ObjectExt};

#[derive(Object, Default)]
struct Entity {
    id: u32,
}

#[derive(Object, Default)]
#[object(describe)]
struct Camera {
    #[object(base)]
    entity: Entity,
    fov: f32,
}

impl fmt::Display for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Camera(id: {}, fov: {})", self.entity.id, self.fov)
    }
}

#[derive(Object, Default)]
#[object(name = "OrthographicCamera")]
struct OrthoCamera {
    #[object(base)]
    camera: Camera,
    half_height: f32,
}

impl OrthoCamera {
    fn zoom(&mut self, factor: f32, smooth: bool) -> Result<()> {
        trace_method_with_state!(
            self.type_object().name(),
            format!("half_height={}", self.half_height),
            factor,
            smooth
        );

        self.half_height /= factor;
        log::info!("Zoomed to half height {}.", self.half_height);
        report(&self.camera)
    }
}

fn report(camera: &Camera) -> Result<()> {
    trace_function!(camera);

    CallStackTracer::global()
        .dump()
        .context("failed to dump the call stack")
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => TracingSettings::from_file(&path)
            .with_context(|| format!("failed to load tracing settings from '{path}'"))?,
        None => TracingSettings::default(),
    };
    let tracer = CallStackTracer::global();
    tracer.configure(settings.clone());
    if tracer.printer().is_none() {
        tracer.set_printer(Arc::new(LogPrinter::new(PlainTextFormatter::new(
            settings.indentation_width,
        ))));
    }

    let names: Vec<_> = registered_types().map(|token| token.name()).collect();
    log::info!("Registered object types: {}", names.join(", "));

    let mut camera = OrthoCamera {
        camera: Camera {
            entity: Entity { id: 7 },
            fov: 60.0,
        },
        half_height: 10.0,
    };

    let object: &dyn Object = &camera;
    log::info!(
        "'{}' is a Camera: {}, is an Entity: {}, classified as '{}'.",
        object.type_object().name(),
        object.is::<Camera>(),
        object.is::<Entity>(),
        classify_value(object).map_or("<none>", |token| token.name()),
    );
    if let Some(entity) = object.as_type::<Entity>() {
        log::info!("Viewed as its Entity base, the id is {}.", entity.id);
    }

    camera.zoom(2.0, true)?;
    tracer.dump().context("failed to dump the call stack")?;

    Ok(())
}
