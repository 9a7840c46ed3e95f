//=========================================================================
// Message Bus
//=========================================================================
//
// Entity-to-script messaging. See `notification_bus` for the flow.
//
//=========================================================================

//=== Module Declarations =================================================

mod notification_bus;

//=== Public API ==========================================================

pub use notification_bus::{
    LifecycleEvent, Notification, NotificationBus, NotificationHandler, ANY_SOURCE,
};
