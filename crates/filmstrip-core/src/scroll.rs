/// One in-flight eased scroll. The origin is fixed at start time and only
/// decides which side the approach terminates on.
#[derive(Clone, Copy, Debug)]
struct ScrollAnimation {
    origin: f32,
    destination: f32,
}

/// One engine-owned scrollable offset (main strip or thumbnail bar) with at
/// most one live animation. Starting a new animation, or writing the offset
/// directly, replaces whatever was in flight — two writers never race on
/// one offset.
#[derive(Clone, Debug)]
pub struct ScrollChannel {
    offset: f32,
    content_extent: f32,
    viewport_extent: f32,
    divisor: f32,
    snap_epsilon: f32,
    animation: Option<ScrollAnimation>,
}

impl ScrollChannel {
    pub fn new(divisor: f32, snap_epsilon: f32) -> Self {
        Self {
            offset: 0.0,
            content_extent: 0.0,
            viewport_extent: 0.0,
            divisor,
            snap_epsilon,
            animation: None,
        }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Destination of the live animation, if one is in flight.
    pub fn destination(&self) -> Option<f32> {
        self.animation.map(|a| a.destination)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Largest writable offset: past it no further content can be revealed.
    pub fn max_offset(&self) -> f32 {
        (self.content_extent - self.viewport_extent).max(0.0)
    }

    /// Update the channel's measurements. Keeps the current offset inside
    /// the new writable range; a live animation keeps running and snaps at
    /// the new bound if its destination fell outside it.
    pub fn set_extents(&mut self, content_extent: f32, viewport_extent: f32) {
        self.content_extent = content_extent;
        self.viewport_extent = viewport_extent;
        self.offset = self.offset.clamp(0.0, self.max_offset());
    }

    /// Start easing toward `destination`, replacing any animation already in
    /// flight. The destination is clamped to the writable range.
    pub fn animate_to(&mut self, destination: f32) {
        self.animation = Some(ScrollAnimation {
            origin: self.offset,
            destination: destination.clamp(0.0, self.max_offset()),
        });
    }

    /// Write the offset directly (the live-drag path). Cancels any in-flight
    /// animation so the drag is the only writer.
    pub fn set_offset(&mut self, offset: f32) {
        self.animation = None;
        self.offset = offset.clamp(0.0, self.max_offset());
    }

    /// Reset to the top of the content, dropping any in-flight animation.
    pub fn reset(&mut self) {
        self.animation = None;
        self.offset = 0.0;
    }

    /// Advance the live animation by one frame. Each step closes
    /// `1/divisor` of the remaining gap; once within `snap_epsilon` of the
    /// destination on the approaching side the offset snaps exactly onto it
    /// and the animation ends. A step that would run past either end of the
    /// writable range snaps to that bound instead of overshooting.
    ///
    /// Returns true while the animation still has frames to run.
    pub fn tick(&mut self) -> bool {
        let Some(anim) = self.animation else {
            return false;
        };
        let current = self.offset;
        let destination = anim.destination;

        let arrived = if destination >= anim.origin {
            current >= destination - self.snap_epsilon
        } else {
            current <= destination + self.snap_epsilon
        };
        if arrived {
            self.offset = destination;
            self.animation = None;
            return false;
        }

        let next = current + (destination - current) / self.divisor;
        if next <= self.snap_epsilon {
            self.offset = 0.0;
            self.animation = None;
            return false;
        }
        let max = self.max_offset();
        if next >= max - self.snap_epsilon {
            self.offset = max;
            self.animation = None;
            return false;
        }
        self.offset = next;
        true
    }
}
