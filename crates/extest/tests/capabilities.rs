//! Context menus and webview frame switching over the mock driver.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::{session, session_with};
use extest::mock::{MockDriver, NodeId};
use extest::page::{ContextMenu, WebView, Workbench};
use extest::prelude::*;
use extest::{MockNode, Selector};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct MenuFixture {
    workbench: NodeId,
    context_view: NodeId,
    block: NodeId,
}

/// Workbench with a hidden context view holding a two-item menu
fn menu_fixture(driver: &MockDriver) -> MenuFixture {
    driver.dom(|dom| {
        let workbench = dom.add_root(MockNode::new("div").class("monaco-workbench"));
        let context_view = dom.add(workbench, MockNode::new("div").class("context-view").hidden());
        let block = dom.add(workbench, MockNode::new("div").class("context-view-block").hidden());
        let menu = dom.add(context_view, MockNode::new("div").class("monaco-menu-container"));
        for label in ["Copy", "Paste"] {
            let item = dom.add(menu, MockNode::new("li").class("action-item"));
            let link = dom.add(item, MockNode::new("a"));
            dom.add(link, MockNode::new("span").class("action-label").attr("aria-label", label));
        }
        MenuFixture {
            workbench,
            context_view,
            block,
        }
    })
}

fn show_menu_on_right_click(driver: &MockDriver, fixture: &MenuFixture) {
    let (view, block) = (fixture.context_view, fixture.block);
    driver.dom(|dom| {
        dom.on_context_click(fixture.workbench, move |dom| {
            dom.set_displayed(view, true);
            dom.set_displayed(block, true);
        });
        dom.on_click(block, move |dom| {
            dom.set_displayed(view, false);
            dom.set_displayed(block, false);
        });
    });
}

// ============================================================================
// Context menus
// ============================================================================

#[tokio::test]
async fn test_context_menu_lists_items() {
    let (driver, session) = session("1.37.0");
    let fixture = menu_fixture(&driver);
    show_menu_on_right_click(&driver, &fixture);

    let workbench = Workbench::new(&session).await.unwrap();
    let menu = workbench.open_context_menu().await.unwrap();
    let labels: Vec<String> = menu
        .items()
        .await
        .unwrap()
        .iter()
        .map(|item| item.label().to_string())
        .collect();
    assert_eq!(labels, ["Copy", "Paste"]);

    menu.close().await.unwrap();
    assert!(!ContextMenu::is_open(&session).await.unwrap());
}

#[tokio::test]
async fn test_stray_menu_closed_before_reopening() {
    let (driver, session) = session("1.37.0");
    let fixture = menu_fixture(&driver);
    show_menu_on_right_click(&driver, &fixture);
    driver.dom(|dom| {
        dom.set_displayed(fixture.context_view, true);
        dom.set_displayed(fixture.block, true);
    });

    let workbench = Workbench::new(&session).await.unwrap();
    workbench.open_context_menu().await.unwrap();

    let history = driver.history();
    let block_click = format!("click:{}", driver.handle(fixture.block).id);
    let right_click = format!("context_click:{}", driver.handle(fixture.workbench).id);
    let closed_at = history.iter().position(|c| *c == block_click).unwrap();
    let opened_at = history.iter().position(|c| *c == right_click).unwrap();
    assert!(closed_at < opened_at);
}

#[tokio::test]
async fn test_context_menu_retries_until_open() {
    let (driver, session) = session("1.37.0");
    let fixture = menu_fixture(&driver);
    let attempts = Arc::new(AtomicUsize::new(0));
    let seen = attempts.clone();
    let view = fixture.context_view;
    driver.dom(|dom| {
        dom.on_context_click(fixture.workbench, move |dom| {
            if seen.fetch_add(1, Ordering::SeqCst) >= 1 {
                dom.set_displayed(view, true);
            }
        });
    });

    let workbench = Workbench::new(&session).await.unwrap();
    workbench.open_context_menu().await.unwrap();
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(driver.call_count("context_click"), 2);
}

#[tokio::test]
async fn test_context_menu_attempts_are_capped() {
    let (driver, session) = session_with(SessionConfig::new().context_menu_attempts(2));
    menu_fixture(&driver);

    let workbench = Workbench::new(&session).await.unwrap();
    let err = workbench.open_context_menu().await.unwrap_err();
    assert!(matches!(err, ExtestError::Timeout { ms: 60, .. }));
    assert_eq!(driver.call_count("context_click"), 2);
}

// ============================================================================
// Webview frames
// ============================================================================

/// Editor webview container plus the two nested iframes it renders into
fn webview_fixture(driver: &MockDriver, session: &Session) -> (NodeId, NodeId) {
    let outer_selector = session.build("WebView.iframe", &["webview-7"]).unwrap();
    driver.dom(|dom| {
        let workbench = dom.add_root(MockNode::new("div").class("monaco-workbench"));
        dom.add(workbench, MockNode::new("div").class("webview").id("webview-7"));
        let host = dom.add(
            workbench,
            MockNode::new("div").attr("data-parent-flow-to-element-id", "webview-7"),
        );
        let outer = dom.add(host, MockNode::new("iframe").answers(outer_selector));
        let active = dom.add(outer, MockNode::new("iframe").id("active-frame"));
        dom.add(active, MockNode::new("h1").text("Hello webview"));
        dom.add_window("window-2");
        (outer, active)
    })
}

#[tokio::test]
async fn test_webview_switches_into_active_frame_and_back() {
    let (driver, session) = session("1.37.0");
    let (outer, active) = webview_fixture(&driver, &session);

    let webview = WebView::new(&session).await.unwrap();
    webview.switch_to_frame(None).await.unwrap();
    assert_eq!(driver.dom(|dom| dom.current_frame()), Some(active));
    assert!(driver.was_called(&format!("switch_to_frame:{}", driver.handle(outer).id)));
    let heading = Element::locate(&session, Selector::tag("h1"), None).await.unwrap();
    assert_eq!(heading.text().await.unwrap(), "Hello webview");

    webview.switch_back().await.unwrap();
    assert_eq!(driver.dom(|dom| dom.current_frame()), None);
    assert_eq!(driver.dom(|dom| dom.current_window().to_string()), "window-1");
}

#[tokio::test]
async fn test_webview_returns_to_first_window() {
    let (driver, session) = session("1.37.0");
    webview_fixture(&driver, &session);

    let webview = WebView::new(&session).await.unwrap();
    webview.switch_to_frame(None).await.unwrap();
    assert_eq!(webview.frame_switch().origin().as_deref(), Some("window-1"));

    session.driver().switch_to_window("window-2").await.unwrap();
    webview.switch_to_frame(None).await.unwrap();
    assert_eq!(webview.frame_switch().origin().as_deref(), Some("window-1"));

    webview.switch_back().await.unwrap();
    assert_eq!(driver.dom(|dom| dom.current_window().to_string()), "window-1");
}

#[tokio::test]
async fn test_webview_without_active_frame_times_out() {
    let (driver, session) = session("1.37.0");
    let (_, active) = webview_fixture(&driver, &session);
    driver.dom(|dom| dom.remove(active));

    let webview = WebView::new(&session).await.unwrap();
    let err = webview.switch_to_frame(Some(5)).await.unwrap_err();
    assert!(matches!(err, ExtestError::Timeout { ms: 5, .. }));
}
