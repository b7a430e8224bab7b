use js_sys::Array;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone, Copy, Debug)]
pub struct ObserverOptions<'a> {
    pub threshold: f64,
    pub root_margin: Option<&'a str>,
}

/// Observes `targets` and calls `on_entry` for every intersection change.
/// The observer is handed to the callback so it can `unobserve` one-shot
/// targets.
pub fn observe(
    targets: &[web::Element],
    options: ObserverOptions<'_>,
    mut on_entry: impl FnMut(&web::IntersectionObserverEntry, &web::IntersectionObserver) + 'static,
) -> anyhow::Result<web::IntersectionObserver> {
    let callback = Closure::wrap(Box::new(
        move |entries: Array, observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                if let Ok(entry) = entry.dyn_into::<web::IntersectionObserverEntry>() {
                    on_entry(&entry, &observer);
                }
            }
        },
    ) as Box<dyn FnMut(Array, web::IntersectionObserver)>);

    let init = web::IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    if let Some(margin) = options.root_margin {
        init.set_root_margin(margin);
    }
    let observer =
        web::IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    callback.forget();

    for target in targets {
        observer.observe(target);
    }
    Ok(observer)
}

/// Adds `class` to each target the first time it intersects, then stops
/// watching it.
pub fn reveal_once(
    targets: &[web::Element],
    options: ObserverOptions<'_>,
    class: &'static str,
) -> anyhow::Result<()> {
    if targets.is_empty() {
        return Ok(());
    }
    observe(targets, options, move |entry, observer| {
        if entry.is_intersecting() {
            let target = entry.target();
            _ = target.class_list().add_1(class);
            observer.unobserve(&target);
        }
    })?;
    log::debug!("[reveal] observing {} .{} targets", targets.len(), class);
    Ok(())
}
