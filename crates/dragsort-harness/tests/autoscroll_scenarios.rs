#![forbid(unsafe_code)]

//! Edge auto-scroll on the virtual clock.

use std::time::Duration;

use dragsort_harness::Harness;
use dragsort_widgets::autoscroll::{ScrollDirection, TickOutcome};
use dragsort_widgets::collection::OrderedCollection;
use dragsort_widgets::config::DragConfig;
use dragsort_widgets::host::ListHost;

const TICK: Duration = Duration::from_millis(100);

fn numbered(count: usize, rows: usize) -> Harness {
    let labels: String = (0..count)
        .map(|i| char::from_u32(0x41 + i as u32).unwrap_or('?'))
        .collect();
    let mut h = Harness::letters(&labels, rows).unwrap();
    h.set_drag_mode(true);
    h
}

/// Reference relocation of the item at `from` to `to`.
fn relocated(h: &Harness, from: usize, to: usize) -> Vec<dragsort_widgets::collection::ItemId> {
    let mut ids = h.order();
    let id = ids.remove(from);
    ids.insert(to, id);
    ids
}

#[test]
fn resting_on_last_visible_scrolls_to_end() {
    let mut h = numbered(30, 10);
    h.press(5).unwrap();
    h.drag_to(9).unwrap();
    let expected = relocated(&h, 9, 29);
    assert_eq!(h.controller.autoscroll().direction(), Some(ScrollDirection::TowardEnd));

    let outcomes = h.advance(Duration::from_secs(5)).unwrap();
    assert_eq!(outcomes.len(), 21);
    assert!(
        outcomes[..20]
            .iter()
            .all(|o| matches!(o, TickOutcome::Scrolled { walk, .. } if walk.steps == 1))
    );
    assert!(matches!(
        outcomes[20],
        TickOutcome::BoundaryReached {
            direction: ScrollDirection::TowardEnd,
            ..
        }
    ));
    assert_eq!(h.controller.hover(), Some(29));
    assert_eq!(h.order(), expected);
    assert_eq!(h.list.last_visible(), Some(29));
    assert_eq!(h.list.pending_timers().count(), 0);

    h.release().unwrap();
    assert_eq!(h.order(), expected);
    assert_eq!(h.adapter.hover(), None);
}

#[test]
fn ticks_follow_the_interval() {
    let mut h = numbered(30, 10);
    h.press(5).unwrap();
    h.drag_to(9).unwrap();

    // First tick runs immediately, then one per interval.
    assert_eq!(h.run_pending().unwrap().len(), 1);
    assert_eq!(h.advance(TICK - Duration::from_millis(1)).unwrap().len(), 0);
    assert_eq!(h.advance(Duration::from_millis(1)).unwrap().len(), 1);
    assert_eq!(h.advance(TICK * 3).unwrap().len(), 3);
    assert_eq!(h.controller.hover(), Some(14));
    assert_eq!(h.list.scrolls(), &[10, 11, 12, 13, 14]);
    let delays: Vec<Duration> = h.list.posted().iter().map(|(_, d)| *d).collect();
    assert_eq!(delays[0], Duration::ZERO);
    assert!(delays[1..].iter().all(|d| *d == TICK));
}

#[test]
fn custom_interval_is_honoured() {
    let adapter = Harness::letters("ABCDEFGHIJ", 4).unwrap().adapter;
    let list = dragsort_harness::SimulatedList::new(10, 4);
    let config = DragConfig::default().with_autoscroll_interval(Duration::from_millis(250));
    let mut h = Harness::new(adapter, list, config).unwrap();
    h.set_drag_mode(true);
    h.press(0).unwrap();
    h.drag_to(3).unwrap();
    assert_eq!(h.advance(Duration::from_millis(500)).unwrap().len(), 3);
}

#[test]
fn resting_on_first_visible_scrolls_to_start() {
    let mut h = numbered(30, 10);
    h.list.scroll_to_top_row(20);
    h.press(25).unwrap();
    h.drag_to(20).unwrap();
    let expected = relocated(&h, 20, 0);

    let outcomes = h.advance(Duration::from_secs(5)).unwrap();
    assert!(matches!(
        outcomes.last(),
        Some(TickOutcome::BoundaryReached {
            direction: ScrollDirection::TowardStart,
            ..
        })
    ));
    assert_eq!(outcomes.len(), 21);
    assert_eq!(h.controller.hover(), Some(0));
    assert_eq!(h.list.first_visible(), Some(0));
    assert_eq!(h.order(), expected);
}

#[test]
fn leaving_the_edge_stops_scrolling() {
    let mut h = numbered(30, 10);
    h.press(2).unwrap();
    h.drag_to(9).unwrap();
    h.advance(TICK * 2).unwrap();
    assert_eq!(h.ticks().len(), 3);

    // Window is now 3..=12; move back into the middle.
    let middle = h.list.first_visible().unwrap() + 4;
    h.drag_to(middle).unwrap();
    assert!(!h.controller.autoscroll().is_armed());
    assert_eq!(h.list.pending_timers().count(), 0);

    let before = h.order();
    assert!(h.advance(Duration::from_secs(2)).unwrap().is_empty());
    assert_eq!(h.order(), before);
    assert_eq!(h.controller.hover(), Some(middle));
}

#[test]
fn reversing_direction_supersedes_schedule() {
    let mut h = numbered(30, 10);
    h.list.scroll_to_top_row(10);
    h.press(15).unwrap();
    h.drag_to(19).unwrap();
    let end_token = h.controller.autoscroll().pending().unwrap();

    h.drag_to(10).unwrap();
    assert_eq!(
        h.controller.autoscroll().direction(),
        Some(ScrollDirection::TowardStart)
    );
    assert!(h.list.pending_timers().all(|(t, _)| t != end_token));

    let outcomes = h.run_pending().unwrap();
    assert!(matches!(
        outcomes.as_slice(),
        [TickOutcome::Scrolled {
            direction: ScrollDirection::TowardStart,
            ..
        }]
    ));
    assert_eq!(h.controller.hover(), Some(9));
}

#[test]
fn final_tick_at_last_item_does_not_reschedule() {
    // Whole list visible: the last visible row is the last item.
    let mut h = numbered(5, 5);
    h.press(3).unwrap();
    h.drag_to(4).unwrap();
    assert_eq!(h.controller.hover(), Some(4));

    let outcomes = h.run_pending().unwrap();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], TickOutcome::BoundaryReached { .. }));
    assert_eq!(h.controller.hover(), Some(4));
    assert_eq!(h.list.pending_timers().count(), 0);
    assert!(h.advance(Duration::from_secs(1)).unwrap().is_empty());
    assert_eq!(h.labels(), "ABCED");
}

#[test]
fn exhausted_edge_is_not_restarted_by_small_moves() {
    let mut h = numbered(5, 5);
    h.press(0).unwrap();
    h.drag_to(4).unwrap();
    h.run_pending().unwrap();
    let posted = h.list.posted().len();
    h.drag_to(4).unwrap();
    h.drag_to(4).unwrap();
    assert_eq!(h.list.posted().len(), posted);
}

#[test]
fn release_during_autoscroll_cancels_pending_tick() {
    let mut h = numbered(30, 10);
    h.press(4).unwrap();
    h.drag_to(9).unwrap();
    h.advance(TICK).unwrap();
    assert_eq!(h.list.pending_timers().count(), 1);
    h.release().unwrap();
    assert_eq!(h.list.pending_timers().count(), 0);
    let order = h.order();
    assert!(h.advance(Duration::from_secs(1)).unwrap().is_empty());
    assert_eq!(h.order(), order);
}

#[test]
fn stale_token_after_release_is_ignored() {
    let mut h = numbered(30, 10);
    h.press(4).unwrap();
    h.drag_to(9).unwrap();
    let token = h.controller.autoscroll().pending().unwrap();
    h.release().unwrap();

    let mut cx = dragsort_widgets::controller::DragContext::new(
        &mut h.list,
        &mut h.adapter,
        &mut h.preview,
    );
    assert_eq!(h.controller.on_timer(token, &mut cx), Ok(TickOutcome::Stale));
}

#[test]
fn replacing_source_stops_autoscroll() {
    let mut h = numbered(30, 10);
    h.press(4).unwrap();
    h.drag_to(9).unwrap();
    h.replace_source(OrderedCollection::from_records([[("label", "only")]]));
    assert!(!h.controller.autoscroll().is_armed());
    assert_eq!(h.list.pending_timers().count(), 0);
}
