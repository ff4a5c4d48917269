//! Computing client positions for a workspace
use crate::{core::Config, pure::geometry::Rect, Xid};

/// A main area to the left holding the first client, with all remaining clients split
/// into equal height rows on the right.
///
/// Laying out is a pure function of the client order and the monitor area: clients are
/// never reordered here and calling [MainAndStack::layout] again with the same inputs gives
/// the same positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MainAndStack {
    ratio: f32,
    space: u32,
    bar_height: u32,
}

impl Default for MainAndStack {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl MainAndStack {
    /// Create a new layout giving `ratio` of the screen width to the main client, with
    /// `space` pixels of gap around clients and `bar_height` pixels reserved at the top.
    pub fn new(ratio: f32, space: u32, bar_height: u32) -> Self {
        Self {
            ratio: ratio.clamp(0.0, 1.0),
            space,
            bar_height,
        }
    }

    /// Create a layout using the values set in the given [Config].
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.master_ratio, config.space, config.bar_height)
    }

    fn main_width(&self, w: u32) -> u32 {
        (w as f32 * self.ratio).floor() as u32
    }

    /// Compute the position of each client in `r`, in client order.
    ///
    /// An empty list of clients gives no positions.
    pub fn layout<'a, I>(&self, clients: I, r: Rect) -> Vec<(Xid, Rect)>
    where
        I: IntoIterator<Item = &'a Xid>,
    {
        let clients: Vec<Xid> = clients.into_iter().copied().collect();
        let s = self.space;
        let y0 = r.y + self.bar_height + s;

        match clients.as_slice() {
            [] => vec![],

            [only] => vec![(
                *only,
                Rect::new(
                    r.x + s,
                    y0,
                    r.w.saturating_sub(3 * s),
                    r.h.saturating_sub(3 * s),
                ),
            )],

            [main, stack @ ..] => {
                let usable = r.h.saturating_sub(self.bar_height + 2 * s);
                let main_w = self.main_width(r.w);
                let stack_x = r.x + main_w + 3 * s;
                let stack_w = r.w.saturating_sub(main_w + 5 * s);
                let slice = usable / stack.len() as u32;
                let stack_h = slice.saturating_sub(2 * s);

                let mut positions = Vec::with_capacity(clients.len());
                positions.push((*main, Rect::new(r.x + s, y0, main_w, usable)));
                positions.extend(stack.iter().enumerate().map(|(i, &c)| {
                    (c, Rect::new(stack_x, y0 + i as u32 * slice, stack_w, stack_h))
                }));

                positions
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck::{Arbitrary, Gen};
    use quickcheck_macros::quickcheck;
    use simple_test_case::test_case;

    fn ids(n: u32) -> Vec<Xid> {
        (1..=n).map(Xid).collect()
    }

    #[test]
    fn no_clients_gives_no_positions() {
        let positions = MainAndStack::default().layout(&ids(0), Rect::new(0, 0, 1000, 600));

        assert!(positions.is_empty());
    }

    #[test_case(Rect::new(0, 0, 1000, 600), Rect::new(10, 30, 970, 570); "origin")]
    #[test_case(Rect::new(1000, 0, 800, 600), Rect::new(1010, 30, 770, 570); "offset monitor")]
    #[test]
    fn single_client_fills_the_screen_within_margins(r: Rect, expected: Rect) {
        let positions = MainAndStack::default().layout(&ids(1), r);

        assert_eq!(positions, vec![(Xid(1), expected)]);
    }

    #[test]
    fn main_and_two_stack_clients() {
        let positions = MainAndStack::default().layout(&ids(3), Rect::new(0, 0, 1000, 600));
        let usable = 600 - 20 - 20;

        assert_eq!(positions.len(), 3);
        assert_eq!(positions[0], (Xid(1), Rect::new(10, 30, 550, usable)));

        let (_, a) = positions[1];
        let (_, b) = positions[2];
        assert_eq!(a.h, b.h);
        assert_eq!(a.x, b.x);
        assert_eq!(a, Rect::new(580, 30, 400, 260));
        assert_eq!(b, Rect::new(580, 310, 400, 260));
        assert!(a.h + b.h <= usable);
    }

    #[test]
    fn positions_are_in_client_order() {
        let clients = vec![Xid(9), Xid(3), Xid(5)];
        let positions = MainAndStack::default().layout(&clients, Rect::new(0, 0, 1000, 600));
        let order: Vec<Xid> = positions.into_iter().map(|(id, _)| id).collect();

        assert_eq!(order, clients);
    }

    #[test]
    fn layout_is_idempotent() {
        let l = MainAndStack::default();
        let r = Rect::new(0, 0, 1920, 1080);

        assert_eq!(l.layout(&ids(5), r), l.layout(&ids(5), r));
    }

    #[test]
    fn tiny_screens_saturate_rather_than_underflow() {
        let positions = MainAndStack::default().layout(&ids(4), Rect::new(0, 0, 20, 20));

        assert_eq!(positions.len(), 4);
        assert!(positions[1..].iter().all(|(_, r)| r.h == 0));
    }

    #[derive(Debug, Clone)]
    struct Screen(Rect);

    impl Arbitrary for Screen {
        fn arbitrary(g: &mut Gen) -> Self {
            Screen(Rect::new(
                u16::arbitrary(g) as u32,
                u16::arbitrary(g) as u32,
                u16::arbitrary(g) as u32,
                u16::arbitrary(g) as u32,
            ))
        }
    }

    #[quickcheck]
    fn every_client_gets_a_position(s: Screen, n: u8) -> bool {
        let positions = MainAndStack::default().layout(&ids(n as u32), s.0);

        positions.len() == n as usize
    }

    #[quickcheck]
    fn stack_slices_never_exceed_the_usable_height(s: Screen, n: u8) -> bool {
        let n = (n as u32 % 20) + 2;
        let positions = MainAndStack::default().layout(&ids(n), s.0);
        let usable = s.0.h.saturating_sub(40);
        let total: u32 = positions[1..].iter().map(|(_, r)| r.h).sum();

        total <= usable
    }
}
