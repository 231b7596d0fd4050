//! Interactive annotation engine for zoomed, scrollable document pages.
//!
//! This crate is compiled to WebAssembly and runs in the browser next to the
//! page renderer. It owns the full lifecycle of vector markup on one page:
//! translating pointer events into annotations, hit-testing and resizing
//! existing markup, auto-scrolling the viewport while an object is dragged
//! near its edge, and drawing the result. The host is responsible only for
//! wiring DOM events to the engine, forwarding the resulting
//! [`engine::Action`]s to the annotation store, and driving the per-frame
//! callback while the engine asks for one.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Tool state machine: [`engine::Engine`] and testable [`engine::EngineCore`] |
//! | [`doc`] | Annotation model and the ordered per-page list |
//! | [`geom`] | Pure geometry: bounds, containment, segment intersection |
//! | [`camera`] | Viewport-to-document coordinate transform |
//! | [`hit`] | Topmost-wins hit-testing and resize handles |
//! | [`input`] | Tools, modifiers, and gesture states |
//! | [`selection`] | Selection set, rubber-band membership, move and resize |
//! | [`autoscroll`] | Edge auto-scroll velocity controller |
//! | [`render`] | Canvas 2D drawing of annotations and selection UI |
//! | [`store`] | Store contract and action forwarding |
//! | [`config`] | Tunable thresholds, overridable from the environment |
//! | [`consts`] | Shared numeric constants |

pub mod autoscroll;
pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod geom;
pub mod hit;
pub mod input;
pub mod render;
pub mod selection;
pub mod store;
