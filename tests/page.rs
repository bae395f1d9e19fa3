#![cfg(all(feature = "chat", feature = "slider"))]

mod common;

use std::time::Duration;
use tokio::time::MissedTickBehavior;

use common::{seat, seats, standard_movie, SlowApi, StubApi};
use seat_booking::commands::Command;
use seat_booking::controllers::seat_picker::{CheckoutState, BOOKING_COMPLETED};
use seat_booking::controllers::{CheckoutOutcome, ChatResponder, ChatWidget, SeatPicker, Slider};
use seat_booking::page::{Flow, Page, PageEvent};
use seat_booking::services::BookingApi;

fn page_with<A: BookingApi + 'static>(api: A, slide_interval: Duration) -> Page<A> {
    let picker = SeatPicker::new(standard_movie(), 9, 11, seats(&[5, 12]));
    Page::new(api, picker)
        .with_chat(ChatWidget::new(ChatResponder::default(), Duration::ZERO))
        .with_slider(Slider::new(vec!["a.jpg".into(), "b.jpg".into()], slide_interval))
}

fn page() -> Page<StubApi> {
    page_with(StubApi::happy(), Duration::from_millis(3500))
}

fn run<A: BookingApi + 'static>(page: &mut Page<A>, lines: &[&str]) {
    for line in lines {
        let command: Command = line.parse().unwrap();
        assert_eq!(page.handle(command), Flow::Continue);
    }
}

#[tokio::test]
async fn commands_drive_the_whole_checkout() {
    let mut page = page();
    run(&mut page, &["seat 1", "seat 2", "seat 5"]);
    assert!(page.render().contains("Seats: 1, 2 — Total: 300"));

    run(&mut page, &["pay"]);
    assert_eq!(page.picker().state(), CheckoutState::CreatingOrder);
    assert_eq!(page.next_event().await, PageEvent::Checkout(Ok(CheckoutOutcome::QrReady)));
    assert_eq!(page.picker().state(), CheckoutState::AwaitingPayment);
    assert!(page.render().contains("[QR]"));

    run(&mut page, &["confirm"]);
    assert_eq!(
        page.next_event().await,
        PageEvent::Checkout(Ok(CheckoutOutcome::Confirmed(seats(&[1, 2]))))
    );
    assert!(!page.request_in_flight());
    assert!(page.picker().grid().is_booked(seat(2)));
    assert_eq!(page.take_feedback(), vec![format!("* {BOOKING_COMPLETED}")]);
    assert!(page.render().contains("No seats selected"));
}

#[tokio::test]
async fn rejected_actions_are_explained() {
    let mut page = page();
    run(&mut page, &["pay", "confirm"]);
    assert!(!page.request_in_flight());
    let feedback = page.take_feedback();
    assert_eq!(feedback.len(), 2);
    assert!(feedback[0].starts_with("cannot pay: no seats selected"));
    assert!(feedback[1].starts_with("cannot confirm:"));
    assert!(page.take_feedback().is_empty());
}

#[tokio::test]
async fn second_pay_while_ordering_is_refused() {
    let mut page = page_with(SlowApi::new(Duration::from_millis(50)), Duration::from_millis(3500));
    run(&mut page, &["seat 1", "pay", "pay"]);
    assert!(page.take_feedback()[0].starts_with("cannot pay:"));

    assert_eq!(page.next_event().await, PageEvent::Checkout(Ok(CheckoutOutcome::QrReady)));
    assert!(!page.request_in_flight());
}

#[tokio::test]
async fn page_stays_live_while_an_order_is_in_flight() {
    let mut page = page_with(SlowApi::new(Duration::from_millis(300)), Duration::from_millis(20));
    run(&mut page, &["seat 1", "pay"]);
    assert_eq!(page.picker().state(), CheckoutState::CreatingOrder);
    assert!(page.request_in_flight());

    // Тот же цикл, что в main: события страницы и таймер слайдера
    let mut ticker = tokio::time::interval(page.tick_interval().unwrap());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0;
    let mut chatted = false;
    let outcome = loop {
        tokio::select! {
            event = page.next_event() => match event {
                PageEvent::Checkout(outcome) => break outcome,
                PageEvent::ChatReply => {}
            },
            _ = ticker.tick() => {
                assert!(page.tick());
                ticks += 1;
                if !chatted {
                    run(&mut page, &["chat hi"]);
                    chatted = true;
                }
            }
        }
    };

    assert_eq!(outcome, Ok(CheckoutOutcome::QrReady));
    assert!(ticks >= 5, "banner rotated only {ticks} times while the order was pending");
    let transcript = page.chat().unwrap().transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[1].text, "Hello! How can I help you today?");
    assert_eq!(page.picker().state(), CheckoutState::AwaitingPayment);
}

#[tokio::test]
async fn chat_command_returns_before_the_reply() {
    let picker = SeatPicker::new(standard_movie(), 9, 11, []);
    let mut page = Page::new(StubApi::happy(), picker)
        .with_chat(ChatWidget::new(ChatResponder::default(), Duration::from_millis(30)));

    run(&mut page, &["chat booking"]);
    assert_eq!(page.chat().unwrap().transcript().len(), 1);

    assert_eq!(page.next_event().await, PageEvent::ChatReply);
    assert_eq!(page.chat().unwrap().transcript().len(), 2);
}

#[tokio::test]
async fn chat_and_banner_commands() {
    let mut page = page();
    run(&mut page, &["open", "chat Booking"]);
    assert_eq!(page.next_event().await, PageEvent::ChatReply);
    let chat = page.chat().unwrap();
    assert!(chat.is_open());
    assert_eq!(chat.transcript().len(), 2);
    assert!(page.render().contains("bot: To book a ticket, open any movie and select your seats."));

    run(&mut page, &["dot 2"]);
    assert_eq!(page.slider().unwrap().index(), 1);
    assert!(page.tick());
    assert_eq!(page.slider().unwrap().index(), 0);

    run(&mut page, &["dot 9"]);
    assert_eq!(page.take_feedback(), vec!["slide 8 out of range (have 2)".to_string()]);
    assert_eq!(page.tick_interval(), Some(Duration::from_millis(3500)));
}

#[tokio::test]
async fn quit_ends_the_session() {
    let mut page = page();
    assert_eq!(page.handle(Command::Quit), Flow::Quit);
}
