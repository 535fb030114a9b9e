//! A container that lays its content out crop-to-fill.
//!
//! The content is sized to the scaled video and moved to the (negative)
//! centering offset, then clipped to the container bounds. The geometry is
//! recomputed on every layout pass, so window resizes are picked up for free.

use iced::advanced::layout::{self, Layout};
use iced::advanced::renderer;
use iced::advanced::widget::{self, Widget};
use iced::advanced::{Clipboard, Shell, overlay};
use iced::{Element, Event, Length, Point, Rectangle, Size, Vector, mouse};

use crate::geometry;

pub struct Crop<'a, Message, Theme = iced::Theme, Renderer = iced::Renderer>
where
    Renderer: iced::advanced::Renderer,
{
    content: Element<'a, Message, Theme, Renderer>,
    /// Intrinsic size of the content, `None` until known.
    intrinsic: Option<Size>,
}

/// Wrap `content` so it covers the available space at `intrinsic`'s aspect
/// ratio. Until the intrinsic size is known the content simply fills.
pub fn crop_to_fill<'a, Message, Theme, Renderer>(
    content: impl Into<Element<'a, Message, Theme, Renderer>>,
    intrinsic: Option<Size>,
) -> Crop<'a, Message, Theme, Renderer>
where
    Renderer: iced::advanced::Renderer,
{
    Crop {
        content: content.into(),
        intrinsic,
    }
}

impl<Message, Theme, Renderer> Widget<Message, Theme, Renderer>
    for Crop<'_, Message, Theme, Renderer>
where
    Renderer: iced::advanced::Renderer,
{
    fn tag(&self) -> widget::tree::Tag {
        self.content.as_widget().tag()
    }

    fn state(&self) -> widget::tree::State {
        self.content.as_widget().state()
    }

    fn children(&self) -> Vec<widget::Tree> {
        self.content.as_widget().children()
    }

    fn diff(&self, tree: &mut widget::Tree) {
        self.content.as_widget().diff(tree);
    }

    fn size(&self) -> Size<Length> {
        Size {
            width: Length::Fill,
            height: Length::Fill,
        }
    }

    fn layout(
        &mut self,
        tree: &mut widget::Tree,
        renderer: &Renderer,
        limits: &layout::Limits,
    ) -> layout::Node {
        let container = limits.width(Length::Fill).height(Length::Fill).max();

        let geometry = self
            .intrinsic
            .and_then(|intrinsic| geometry::crop_to_fill(intrinsic, container));

        let content = self.content.as_widget_mut();
        let node = match geometry {
            Some(geo) => content
                .layout(
                    tree,
                    renderer,
                    &layout::Limits::new(Size::ZERO, Size::new(geo.width, geo.height)),
                )
                .move_to(Point::new(geo.x, geo.y)),
            None => content.layout(tree, renderer, &layout::Limits::new(Size::ZERO, container)),
        };

        layout::Node::with_children(container, vec![node])
    }

    fn operate(
        &mut self,
        tree: &mut widget::Tree,
        layout: Layout<'_>,
        renderer: &Renderer,
        operation: &mut dyn widget::Operation,
    ) {
        if let Some(child) = layout.children().next() {
            self.content
                .as_widget_mut()
                .operate(tree, child, renderer, operation);
        }
    }

    fn update(
        &mut self,
        tree: &mut widget::Tree,
        event: &Event,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        renderer: &Renderer,
        clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, Message>,
        viewport: &Rectangle,
    ) {
        if let Some(child) = layout.children().next() {
            self.content.as_widget_mut().update(
                tree, event, child, cursor, renderer, clipboard, shell, viewport,
            );
        }
    }

    fn mouse_interaction(
        &self,
        tree: &widget::Tree,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
        renderer: &Renderer,
    ) -> mouse::Interaction {
        layout
            .children()
            .next()
            .map(|child| {
                self.content
                    .as_widget()
                    .mouse_interaction(tree, child, cursor, viewport, renderer)
            })
            .unwrap_or_default()
    }

    fn draw(
        &self,
        tree: &widget::Tree,
        renderer: &mut Renderer,
        theme: &Theme,
        style: &renderer::Style,
        layout: Layout<'_>,
        cursor: mouse::Cursor,
        viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let Some(child) = layout.children().next() else {
            return;
        };
        let Some(visible) = bounds.intersection(viewport) else {
            return;
        };

        // The scaled content overflows the container; only the centre shows.
        renderer.with_layer(bounds, |renderer| {
            self.content
                .as_widget()
                .draw(tree, renderer, theme, style, child, cursor, &visible);
        });
    }

    fn overlay<'b>(
        &'b mut self,
        tree: &'b mut widget::Tree,
        layout: Layout<'b>,
        renderer: &Renderer,
        viewport: &Rectangle,
        translation: Vector,
    ) -> Option<overlay::Element<'b, Message, Theme, Renderer>> {
        let child = layout.children().next()?;
        self.content
            .as_widget_mut()
            .overlay(tree, child, renderer, viewport, translation)
    }
}

impl<'a, Message, Theme, Renderer> From<Crop<'a, Message, Theme, Renderer>>
    for Element<'a, Message, Theme, Renderer>
where
    Message: 'a,
    Theme: 'a,
    Renderer: iced::advanced::Renderer + 'a,
{
    fn from(crop: Crop<'a, Message, Theme, Renderer>) -> Element<'a, Message, Theme, Renderer> {
        Element::new(crop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::widget::Space;

    fn lay_out(intrinsic: Option<Size>, container: Size) -> layout::Node {
        let mut element: Element<'_, (), iced::Theme, ()> = crop_to_fill(
            Space::new().width(Length::Fill).height(Length::Fill),
            intrinsic,
        )
        .into();
        let mut tree = widget::Tree::new(&element);

        element.as_widget_mut().layout(
            &mut tree,
            &(),
            &layout::Limits::new(Size::ZERO, container),
        )
    }

    #[test]
    fn test_content_bounds_match_crop_geometry() {
        let video = Size::new(1280.0, 720.0);
        let screen = Size::new(1080.0, 1920.0);
        let geo = geometry::crop_to_fill(video, screen).unwrap();

        let node = lay_out(Some(video), screen);
        assert_eq!(node.size(), screen);

        let child = node.children()[0].bounds();
        let expected = Rectangle::new(Point::new(geo.x, geo.y), Size::new(geo.width, geo.height));
        assert_eq!(child, expected);
        assert!(child.x < 0.0);
        assert_eq!(child.y, 0.0);
    }

    #[test]
    fn test_tall_video_overflows_vertically() {
        let video = Size::new(720.0, 1280.0);
        let screen = Size::new(1920.0, 1080.0);
        let geo = geometry::crop_to_fill(video, screen).unwrap();

        let child = lay_out(Some(video), screen).children()[0].bounds();
        assert_eq!(child.width, screen.width);
        assert_eq!(child.height, geo.height);
        assert_eq!(child.y, geo.y);
        assert!(child.y < 0.0);
    }

    #[test]
    fn test_unknown_size_fills_container() {
        let screen = Size::new(1920.0, 1080.0);
        let child = lay_out(None, screen).children()[0].bounds();
        assert_eq!(child, Rectangle::new(Point::ORIGIN, screen));
    }
}
