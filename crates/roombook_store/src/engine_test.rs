#[cfg(test)]
mod tests {
    use crate::engine::BookingEngine;
    use crate::error::StoreError;
    use crate::models::{BookingId, BookingReceipt, BookingRecord, Catalog};
    use crate::session::Session;
    use crate::store::MockBookingStore;
    use roombook_common::{HttpStatusCode, RoombookError};
    use roombook_slots::{
        FixedClock, Gesture, InputMode, LocalClock, LocalInstant, ResourceKey, Revision, Role,
        RoomKey,
    };
    use std::sync::Arc;

    fn at(text: &str) -> LocalInstant {
        LocalClock::parse(text).unwrap()
    }

    fn catalog() -> Catalog {
        serde_json::from_value(serde_json::json!({
            "rooms": [
                {"key": "WOLF", "label": "Wolf"},
                {"key": "HERMLIN", "label": "Hermelin"}
            ],
            "resources": [
                {"key": "SAUNA", "label": "Sauna"},
                {"key": "GRILL", "label": "Grillhütte"}
            ],
            "booking_rules": {
                "min_time": "08:00",
                "max_time": "22:00",
                "step_minutes": 15,
                "default_duration_minutes": 60,
                "max_days_ahead": 14,
                "resource_rules": {
                    "SAUNA": {"max_minutes": 120, "min_minutes": 30, "buffer_minutes": 60},
                    "GRILL": {"max_minutes": 240, "min_minutes": 30, "buffer_minutes": 60}
                }
            }
        }))
        .unwrap()
    }

    fn records() -> Vec<BookingRecord> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "room": "Wolf", "resource": "Sauna", "start": "2024-03-02T10:00:00", "end": "2024-03-02T11:00:00"},
            {"id": 2, "room": "Hermelin", "resource": "Grillhütte", "start": "2024-03-02T12:00:00", "end": "2024-03-02T14:00:00"}
        ]))
        .unwrap()
    }

    fn store_for(role: Role) -> MockBookingStore {
        let mut store = MockBookingStore::new();
        store
            .expect_login()
            .returning(move |_| Ok(Session::new("tok", role)));
        store.expect_catalog().returning(|| Ok(catalog()));
        store
    }

    fn engine(store: MockBookingStore, mode: InputMode) -> BookingEngine {
        BookingEngine::new(
            Arc::new(store),
            Arc::new(FixedClock(at("2024-03-01T09:10:00"))),
            mode,
        )
    }

    fn tap(text: &str) -> Gesture {
        Gesture::Tap { point: at(text) }
    }

    #[tokio::test]
    async fn test_everything_is_a_no_op_before_the_catalog_loads() {
        let engine = engine(store_for(Role::User), InputMode::Tap);
        engine.login("pw").await.unwrap();

        assert!(engine.select(&tap("2024-03-02T10:00:00")).await.is_none());
        assert!(engine.revise_start("10:00").await.is_none());
        assert!(engine.availability().await.is_none());
        assert!(engine.rule_summary().await.is_none());
        assert_eq!(engine.select_resource(ResourceKey::from("SAUNA")).await, Ok(None));
        assert_eq!(engine.choose_room(RoomKey::from("WOLF")).await, Ok(false));
        assert_eq!(engine.refresh_bookings().await, Ok(None));
        assert_eq!(engine.submit_draft().await, Err(RoombookError::StaleState));
        assert_eq!(
            engine.remove(&BookingId::new("1")).await,
            Err(RoombookError::StaleState)
        );
    }

    #[tokio::test]
    async fn test_load_catalog_activates_first_resource() {
        let engine = engine(store_for(Role::User), InputMode::Tap);
        engine.load_catalog().await.unwrap();

        assert_eq!(engine.active_resource().await, Some(ResourceKey::from("SAUNA")));
        let availability = engine.availability().await.unwrap();
        assert_eq!(availability.min_allowed(), at("2024-03-01T10:15:00"));
        let summary = engine.rule_summary().await.unwrap();
        assert_eq!(summary.buffer_minutes, 60);
    }

    #[tokio::test]
    async fn test_invalid_rules_are_refused() {
        let mut store = MockBookingStore::new();
        store.expect_catalog().returning(|| {
            let mut broken = catalog();
            broken.rules.step_minutes = 0;
            Ok(broken)
        });
        let engine = engine(store, InputMode::Tap);
        assert!(matches!(
            engine.load_catalog().await,
            Err(RoombookError::ConfigError(_))
        ));
        assert!(engine.availability().await.is_none());
    }

    #[tokio::test]
    async fn test_tap_submit_and_refresh() {
        let mut store = store_for(Role::User);
        store
            .expect_create_booking()
            .withf(|_, booking| {
                booking.room.as_str() == "WOLF"
                    && booking.resource.as_str() == "SAUNA"
                    && LocalClock::serialize(&booking.start) == "2024-03-02T10:00:00"
                    && LocalClock::serialize(&booking.end) == "2024-03-02T11:00:00"
            })
            .times(1)
            .returning(|_, _| Ok(BookingReceipt::default()));
        store
            .expect_list_bookings()
            .times(1)
            .returning(|_| Ok(records()));

        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();

        let slot = engine
            .select(&tap("2024-03-02T10:07:00"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(slot.start(), at("2024-03-02T10:00:00"));
        assert_eq!(engine.choose_room(RoomKey::from("WOLF")).await, Ok(true));

        engine.submit_draft().await.unwrap();
        assert!(engine.draft().await.is_none());

        let bookings = engine.bookings().await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].room, "Wolf");
        assert_eq!(bookings[0].id, BookingId::new("1"));
    }

    #[tokio::test]
    async fn test_drag_mode_ignores_taps() {
        let engine = engine(store_for(Role::User), InputMode::Drag);
        engine.load_catalog().await.unwrap();

        assert!(engine.select(&tap("2024-03-02T10:00:00")).await.is_none());
        let drag = Gesture::Drag {
            start: at("2024-03-02T10:00:00"),
            end: at("2024-03-02T11:30:00"),
        };
        let slot = engine.select(&drag).await.unwrap().unwrap();
        assert_eq!(slot.duration_minutes(), 90);
    }

    #[tokio::test]
    async fn test_selection_in_buffer_keeps_previous_draft() {
        let engine = engine(store_for(Role::User), InputMode::Tap);
        engine.load_catalog().await.unwrap();

        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();
        let err = engine
            .select(&tap("2024-03-01T09:30:00"))
            .await
            .unwrap()
            .unwrap_err();
        assert_eq!(err.status_code(), 422);
        assert_eq!(
            engine.draft().await.unwrap().slot.start(),
            at("2024-03-02T10:00:00")
        );
    }

    #[tokio::test]
    async fn test_revisions_update_the_draft() {
        let engine = engine(store_for(Role::User), InputMode::Tap);
        engine.load_catalog().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();

        assert!(engine.revise_end("11:38").await.unwrap().is_applied());
        assert_eq!(
            engine.draft().await.unwrap().slot.end(),
            at("2024-03-02T11:45:00")
        );

        let rejected = engine.revise_start("12:00").await.unwrap();
        assert!(matches!(rejected, Revision::Unchanged { .. }));
        assert_eq!(
            engine.draft().await.unwrap().slot.start(),
            at("2024-03-02T10:00:00")
        );
    }

    #[tokio::test]
    async fn test_policy_blocks_submission_before_network() {
        let mut store = store_for(Role::User);
        store.expect_create_booking().times(0);

        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();
        engine.revise_end("12:15").await.unwrap();
        engine.choose_room(RoomKey::from("WOLF")).await.unwrap();

        let err = engine.submit_draft().await.unwrap_err();
        assert_eq!(
            err,
            RoombookError::OutOfRules("Maximum booking duration: 120 minutes".to_string())
        );
        assert!(engine.draft().await.is_some());
    }

    #[tokio::test]
    async fn test_submit_needs_room_and_session() {
        let mut store = store_for(Role::User);
        store.expect_create_booking().times(0);
        let engine = engine(store, InputMode::Tap);
        engine.load_catalog().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();

        assert!(matches!(
            engine.submit_draft().await,
            Err(RoombookError::Unauthorized(_))
        ));
        engine.login("pw").await.unwrap();
        assert!(matches!(
            engine.submit_draft().await,
            Err(RoombookError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_store_rejection_surfaces_detail_and_keeps_draft() {
        let mut store = store_for(Role::User);
        store.expect_create_booking().returning(|_, _| {
            Err(StoreError::Rejected {
                status: 409,
                message: "Room occupied".to_string(),
            })
        });
        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();
        engine.choose_room(RoomKey::from("WOLF")).await.unwrap();

        let err = engine.submit_draft().await.unwrap_err();
        assert_eq!(err.detail(), "Room occupied");
        assert_eq!(err.status_code(), 409);
        assert!(engine.draft().await.is_some());
    }

    #[tokio::test]
    async fn test_admin_books_inside_buffer_and_deletes() {
        let mut store = store_for(Role::Admin);
        store
            .expect_create_booking()
            .withf(|_, booking| LocalClock::serialize(&booking.start) == "2024-03-01T09:30:00")
            .times(1)
            .returning(|_, _| Ok(BookingReceipt::default()));
        store
            .expect_delete_booking()
            .times(1)
            .returning(|_, _| Ok(()));
        store.expect_list_bookings().returning(|_| Ok(vec![]));

        let engine = engine(store, InputMode::Drag);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        assert!(engine.may_delete_bookings().await);

        // 09:30 is inside the sauna's lead time at 09:10.
        let availability = engine.availability().await.unwrap();
        assert!(!availability.is_disabled(&at("2024-03-01T09:30:00")));
        assert!(availability.regions().is_empty());

        let drag = Gesture::Drag {
            start: at("2024-03-01T09:30:00"),
            end: at("2024-03-01T10:00:00"),
        };
        let slot = engine.select(&drag).await.unwrap().unwrap();
        assert_eq!(slot.start(), at("2024-03-01T09:30:00"));
        assert!(engine.revise_start("09:15").await.unwrap().is_applied());
        assert!(engine.revise_start("09:30").await.unwrap().is_applied());

        engine.choose_room(RoomKey::from("HERMLIN")).await.unwrap();
        engine.submit_draft().await.unwrap();

        engine.remove(&BookingId::new("1")).await.unwrap();
    }

    #[tokio::test]
    async fn test_user_is_held_to_the_lead_time() {
        let engine = engine(store_for(Role::User), InputMode::Drag);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();

        assert!(engine
            .availability()
            .await
            .unwrap()
            .is_disabled(&at("2024-03-01T09:30:00")));
        let drag = Gesture::Drag {
            start: at("2024-03-01T09:30:00"),
            end: at("2024-03-01T10:00:00"),
        };
        let err = engine.select(&drag).await.unwrap().unwrap_err();
        assert!(matches!(err, RoombookError::OutOfRules(_)));
        assert!(engine.draft().await.is_none());
    }

    #[tokio::test]
    async fn test_login_starts_from_a_clean_slate() {
        let mut store = store_for(Role::User);
        store.expect_list_bookings().returning(|_| Ok(records()));
        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        engine.refresh_bookings().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();
        assert!(engine.draft().await.is_some());
        assert_eq!(engine.bookings().await.len(), 1);

        engine.login("pw").await.unwrap();
        assert!(engine.draft().await.is_none());
        assert!(engine.bookings().await.is_empty());
        assert_eq!(engine.active_resource().await, Some(ResourceKey::from("SAUNA")));
    }

    #[tokio::test]
    async fn test_user_cannot_delete() {
        let mut store = store_for(Role::User);
        store.expect_delete_booking().times(0);
        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();

        let err = engine.remove(&BookingId::new("1")).await.unwrap_err();
        assert_eq!(err.status_code(), 403);
    }

    #[tokio::test]
    async fn test_switching_resource_clears_draft_and_bookings() {
        let mut store = store_for(Role::User);
        store.expect_list_bookings().returning(|_| Ok(records()));
        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        engine.refresh_bookings().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();

        let summary = engine
            .select_resource(ResourceKey::from("GRILL"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.duration.unwrap().max_minutes, 240);
        assert!(engine.draft().await.is_none());
        assert!(engine.bookings().await.is_empty());

        let grill = engine.refresh_bookings().await.unwrap().unwrap();
        assert_eq!(grill.len(), 1);
        assert_eq!(grill[0].room, "Hermelin");

        assert!(matches!(
            engine.select_resource(ResourceKey::from("BEAMER")).await,
            Err(RoombookError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_logout_tears_down_session_state() {
        let mut store = store_for(Role::Admin);
        store.expect_list_bookings().returning(|_| Ok(records()));
        let engine = engine(store, InputMode::Tap);
        engine.login("pw").await.unwrap();
        engine.load_catalog().await.unwrap();
        engine.refresh_bookings().await.unwrap();
        engine.select(&tap("2024-03-02T10:00:00")).await.unwrap().unwrap();

        engine.logout().await;
        assert_eq!(engine.role().await, None);
        assert!(engine.draft().await.is_none());
        assert!(engine.bookings().await.is_empty());
        assert!(matches!(
            engine.refresh_bookings().await,
            Err(RoombookError::Unauthorized(_))
        ));
        // The catalog survives a logout.
        assert!(engine.availability().await.is_some());
    }
}
