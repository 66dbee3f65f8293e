use std::collections::BTreeMap;
use std::rc::Rc;

use folio_core::visibility::{IntersectionSample, ObserverHost, RegionHandle, SensorOptions};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

type EntriesCallback = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct ActiveObserver {
    observer: IntersectionObserver,
    _callback: EntriesCallback,
}

/// Element and observer bookkeeping, keyed by region handle.
///
/// Observers taken out of service are parked in `retired` rather than
/// dropped: a freeze unobserves from inside that observer's own callback.
/// They are released at the next [`prune`](Self::prune), which runs before
/// a mount.
struct RegionTable<E, O> {
    elements: BTreeMap<RegionHandle, E>,
    active: BTreeMap<RegionHandle, O>,
    retired: Vec<O>,
    next_handle: u64,
}

impl<E, O> RegionTable<E, O> {
    fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            active: BTreeMap::new(),
            retired: Vec::new(),
            next_handle: 0,
        }
    }

    fn insert(&mut self, element: E) -> RegionHandle {
        let handle = RegionHandle(self.next_handle);
        self.next_handle += 1;
        self.elements.insert(handle, element);
        handle
    }

    fn element(&self, handle: RegionHandle) -> Option<&E> {
        self.elements.get(&handle)
    }

    /// Install `observer` for `handle`, returning the one it replaces.
    fn activate(&mut self, handle: RegionHandle, observer: O) -> Option<&O> {
        let previous = self.active.insert(handle, observer)?;
        self.retired.push(previous);
        self.retired.last()
    }

    /// Stop tracking `handle`, returning its observer for disconnection.
    fn release(&mut self, handle: RegionHandle) -> Option<&O> {
        self.elements.remove(&handle);
        let observer = self.active.remove(&handle)?;
        self.retired.push(observer);
        self.retired.last()
    }

    /// Forget elements nothing observes and free retired observers.
    fn prune(&mut self) {
        let active = &self.active;
        self.elements.retain(|handle, _| active.contains_key(handle));
        self.retired.clear();
    }

    fn take_all(&mut self) -> impl Iterator<Item = O> {
        self.elements.clear();
        self.retired.clear();
        std::mem::take(&mut self.active).into_values()
    }

    fn observing(&self) -> usize {
        self.active.len()
    }

    #[cfg(test)]
    fn tracked(&self) -> (usize, usize) {
        (self.elements.len(), self.retired.len())
    }
}

/// [`ObserverHost`] backed by the browser's `IntersectionObserver`, one
/// observer per region so each can carry its own threshold and margin.
pub(crate) struct DomObserverHost {
    document: web_sys::Document,
    deliver: Rc<dyn Fn(IntersectionSample)>,
    table: RegionTable<web_sys::Element, ActiveObserver>,
}

impl DomObserverHost {
    pub(crate) fn new(document: web_sys::Document, deliver: Rc<dyn Fn(IntersectionSample)>) -> Self {
        Self {
            document,
            deliver,
            table: RegionTable::new(),
        }
    }

    /// Look up the element with `id` and hand out a handle for it.
    pub(crate) fn register(&mut self, id: &str) -> Option<RegionHandle> {
        let element = self.document.get_element_by_id(id)?;
        Some(self.table.insert(element))
    }

    /// Drop regions left over from an earlier mount. Call before
    /// registering a new set.
    pub(crate) fn prune(&mut self) {
        self.table.prune();
    }

    /// Disconnect everything and forget all registered regions.
    pub(crate) fn clear(&mut self) {
        for active in self.table.take_all() {
            active.observer.disconnect();
        }
    }

    pub(crate) fn observing(&self) -> usize {
        self.table.observing()
    }
}

impl ObserverHost for DomObserverHost {
    fn supports_intersection(&self) -> bool {
        web_sys::window().is_some_and(|window| {
            js_sys::Reflect::has(&window, &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false)
        })
    }

    fn observe(&mut self, target: RegionHandle, options: &SensorOptions) {
        let Some(element) = self.table.element(target) else {
            return;
        };
        let deliver = Rc::clone(&self.deliver);
        let callback: EntriesCallback = Closure::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let entry: IntersectionObserverEntry = entry.unchecked_into();
                    deliver(IntersectionSample {
                        target,
                        intersecting: entry.is_intersecting(),
                        ratio: entry.intersection_ratio(),
                    });
                }
            },
        );

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&String::from(options.root_margin));

        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => {
                observer.observe(element);
                let active = ActiveObserver {
                    observer,
                    _callback: callback,
                };
                if let Some(previous) = self.table.activate(target, active) {
                    previous.observer.disconnect();
                }
            }
            Err(e) => {
                web_sys::console::warn_1(
                    &format!("folio: could not observe region {}: {e:?}", target.0).into(),
                );
            }
        }
    }

    fn unobserve(&mut self, target: RegionHandle) {
        if let Some(active) = self.table.release(target) {
            active.observer.disconnect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_forgets_the_element() {
        let mut table: RegionTable<&str, u32> = RegionTable::new();
        let about = table.insert("about");
        table.activate(about, 1);
        assert_eq!(table.release(about), Some(&1));
        assert_eq!(table.element(about), None);
        assert_eq!(table.observing(), 0);
    }

    #[test]
    fn repeated_mounts_do_not_accumulate() {
        let mut table: RegionTable<&str, u32> = RegionTable::new();
        for round in 0..5 {
            table.prune();
            // A fresh mount re-registers every section and re-attaches,
            // which releases the previous round's handles.
            let stale: Vec<_> = table.active.keys().copied().collect();
            let skills = table.insert("skills");
            let contact = table.insert("contact");
            for handle in stale {
                table.release(handle);
            }
            table.activate(skills, round);
            table.activate(contact, round);
        }
        table.prune();
        assert_eq!(table.tracked(), (2, 0));
        assert_eq!(table.observing(), 2);
    }

    #[test]
    fn prune_drops_unobserved_elements() {
        let mut table: RegionTable<&str, u32> = RegionTable::new();
        let home = table.insert("home");
        let skills = table.insert("skills");
        table.activate(skills, 7);
        table.prune();
        assert_eq!(table.element(home), None);
        assert_eq!(table.element(skills), Some(&"skills"));
    }

    #[test]
    fn replaced_observer_is_retired_until_prune() {
        let mut table: RegionTable<&str, u32> = RegionTable::new();
        let home = table.insert("home");
        table.activate(home, 1);
        assert_eq!(table.activate(home, 2), Some(&1));
        assert_eq!(table.tracked(), (1, 1));
        table.prune();
        assert_eq!(table.tracked(), (1, 0));
    }
}
