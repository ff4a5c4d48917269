//! Converting x11rb events into [XEvent]s
use crate::{
    core::bindings::{KeyCode, ModMask},
    pure::geometry::{Point, Rect},
    x::{ConfigureRequest, ExposeEvent, PointerChange, StackMode, XEvent},
    Result, Xid,
};
use tracing::{debug, error, trace};
use x11rb::{
    connection::Connection,
    errors::ReplyError,
    protocol::{
        xproto::{self, ConfigWindow, ConfigureRequestEvent, ConnectionExt as _, NotifyMode},
        Event,
    },
};

pub(crate) fn convert_event<C: Connection>(conn: &C, event: Event) -> Result<Option<XEvent>> {
    match event {
        Event::KeyPress(event) => {
            let code = KeyCode {
                mask: ModMask::from_bits_truncate(u16::from(event.state)),
                code: event.detail,
            };

            Ok(Some(XEvent::KeyPress(code.ignoring_modifier(ModMask::LOCKS))))
        }

        Event::MapRequest(event) => {
            let attrs = match conn.get_window_attributes(event.window)?.reply() {
                Ok(attrs) => attrs,
                // The window can be destroyed before its map request is processed
                Err(ReplyError::X11Error(err)) => {
                    debug!(id = event.window, ?err, "dropping map request for missing window");
                    return Ok(None);
                }
                Err(e) => return Err(e.into()),
            };
            if attrs.override_redirect {
                trace!(id = event.window, "ignoring map request for override redirect window");
                return Ok(None);
            }

            Ok(Some(XEvent::MapRequest(Xid(event.window))))
        }

        Event::EnterNotify(event) if event.mode == NotifyMode::NORMAL => {
            Ok(Some(XEvent::Enter(PointerChange {
                id: Xid(event.event),
                abs: Point::new(event.root_x.max(0) as u32, event.root_y.max(0) as u32),
            })))
        }

        Event::DestroyNotify(event) => Ok(Some(XEvent::Destroy(Xid(event.window)))),

        Event::ConfigureRequest(event) => Ok(Some(XEvent::ConfigureRequest(
            configure_request(&event),
        ))),

        Event::Expose(event) => Ok(Some(XEvent::Expose(ExposeEvent {
            id: Xid(event.window),
            r: Rect::new(
                event.x as u32,
                event.y as u32,
                event.width as u32,
                event.height as u32,
            ),
            count: event.count as usize,
        }))),

        // Errors for requests on windows that have since been destroyed are expected
        Event::Error(err) => {
            error!(?err, "X11 protocol error");
            Ok(None)
        }

        // NOTE: Ignoring other event types
        _ => Ok(None),
    }
}

fn configure_request(event: &ConfigureRequestEvent) -> ConfigureRequest {
    let mask = u16::from(event.value_mask);
    let has = |flag: ConfigWindow| mask & u16::from(flag) != 0;

    ConfigureRequest {
        id: Xid(event.window),
        x: has(ConfigWindow::X).then_some(event.x as i32),
        y: has(ConfigWindow::Y).then_some(event.y as i32),
        w: has(ConfigWindow::WIDTH).then_some(event.width as u32),
        h: has(ConfigWindow::HEIGHT).then_some(event.height as u32),
        border_width: has(ConfigWindow::BORDER_WIDTH).then_some(event.border_width as u32),
        sibling: has(ConfigWindow::SIBLING).then_some(Xid(event.sibling)),
        stack_mode: if has(ConfigWindow::STACK_MODE) {
            stack_mode(event.stack_mode)
        } else {
            None
        },
    }
}

fn stack_mode(mode: xproto::StackMode) -> Option<StackMode> {
    match mode {
        xproto::StackMode::ABOVE => Some(StackMode::Above),
        xproto::StackMode::BELOW => Some(StackMode::Below),
        xproto::StackMode::TOP_IF => Some(StackMode::TopIf),
        xproto::StackMode::BOTTOM_IF => Some(StackMode::BottomIf),
        xproto::StackMode::OPPOSITE => Some(StackMode::Opposite),
        _ => None,
    }
}

pub(crate) fn x_stack_mode(mode: StackMode) -> xproto::StackMode {
    match mode {
        StackMode::Above => xproto::StackMode::ABOVE,
        StackMode::Below => xproto::StackMode::BELOW,
        StackMode::TopIf => xproto::StackMode::TOP_IF,
        StackMode::BottomIf => xproto::StackMode::BOTTOM_IF,
        StackMode::Opposite => xproto::StackMode::OPPOSITE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_requested_fields_are_set() {
        let event = ConfigureRequestEvent {
            window: 42,
            x: 10,
            y: 20,
            width: 300,
            height: 400,
            value_mask: ConfigWindow::WIDTH | ConfigWindow::HEIGHT,
            ..Default::default()
        };

        assert_eq!(
            configure_request(&event),
            ConfigureRequest {
                id: Xid(42),
                w: Some(300),
                h: Some(400),
                ..Default::default()
            }
        );
    }

    #[test]
    fn stack_modes_survive_conversion() {
        for mode in [
            StackMode::Above,
            StackMode::Below,
            StackMode::TopIf,
            StackMode::BottomIf,
            StackMode::Opposite,
        ] {
            assert_eq!(stack_mode(x_stack_mode(mode)), Some(mode));
        }
    }
}
