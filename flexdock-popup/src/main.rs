//! popup-demo: drive a popup menu headlessly and log what happens.
//!
//! Usage: `popup-demo [config.json]`. Set `RUST_LOG=debug` to see the
//! lifecycle events.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use flexdock_popup::{MenuItem, PopupConfig, PopupContext, PopupNode, PopupRequest, show_popup};
use flexdock_surface::{Content, Document, DragDrop, MouseButton, Point, Rect};
use tracing_subscriber::EnvFilter;

struct DemoTab {
    name: &'static str,
    path: &'static str,
}

impl PopupNode for DemoTab {
    fn help_text(&self) -> String {
        self.path.to_string()
    }

    fn rendered_name(&self) -> Content {
        Content::Group(vec![Content::Icon("file".into()), Content::text(self.name)])
    }
}

fn load_config() -> anyhow::Result<PopupConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading popup config {path}"))?;
            Ok(PopupConfig::from_json(&json)?)
        }
        None => Ok(PopupConfig::default()),
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config()?;
    let doc = Document::new(Rect::new(0.0, 0.0, 1280.0, 800.0));

    let layout = doc.create_element();
    doc.set_bounds(layout, Rect::new(0.0, 0.0, 1280.0, 800.0))?;
    doc.append_child(doc.body(), layout)?;

    // Overflow button at the right end of a tab strip.
    let overflow = doc.create_element();
    doc.set_bounds(overflow, Rect::from_edges(1240.0, 4.0, 1260.0, 24.0))?;
    doc.append_child(layout, overflow)?;

    let ctx = PopupContext::with_config(DragDrop::new(doc.clone()), config);
    let tabs = [
        DemoTab { name: "main.rs", path: "src/main.rs" },
        DemoTab { name: "lib.rs", path: "src/lib.rs" },
        DemoTab { name: "Cargo.toml", path: "Cargo.toml" },
    ];
    let nodes: Vec<Rc<DemoTab>> = tabs.into_iter().map(Rc::new).collect();
    let items = || -> Vec<MenuItem<DemoTab>> {
        nodes
            .iter()
            .enumerate()
            .map(|(i, node)| MenuItem::new(i + 3, node.clone()))
            .collect()
    };

    let log: Rc<RefCell<Vec<String>>> = Rc::default();

    // Pick the second hidden tab.
    let l = log.clone();
    let popup = show_popup(
        &ctx,
        layout,
        overflow,
        PopupRequest::new(items(), move |item| {
            l.borrow_mut().push(format!("selected tab {} ({})", item.index, item.node.name))
        }),
    )?;
    let row = popup.rows()[1];
    doc.click(doc.bounding_rect(row)?.center(), MouseButton::Left);

    // Open again and dismiss by clicking elsewhere.
    let l = log.clone();
    let popup = show_popup(
        &ctx,
        layout,
        overflow,
        PopupRequest::new(items(), |_| {}).on_hide(move || l.borrow_mut().push("dismissed".into())),
    )?;
    tracing::info!(container = %popup.container(), "second popup open");
    doc.click(Point::new(100.0, 600.0), MouseButton::Left);

    for line in log.borrow().iter() {
        println!("{line}");
    }
    Ok(())
}
