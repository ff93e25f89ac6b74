use pizzaday_core as game;
use yew::prelude::*;

const BACK_IMAGE: &str = "/image/back-card.jpg";

pub(crate) fn card_classes(card: &game::CardView) -> Classes {
    let mut class = classes!("card");
    if card.revealed {
        class.push("flipped");
    }
    if card.in_scored_line {
        class.push("scored");
    }
    class
}

pub(crate) fn face_image(icon: game::IconKind) -> String {
    format!("/image/{}.png", icon.asset_name())
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct CardProps {
    pub card: game::CardView,
    #[prop_or_default]
    pub locked: bool,
    pub callback: Callback<game::CellIndex>,
}

/// One flippable card: the back face while hidden, the icon once revealed.
#[function_component(CardTile)]
pub(crate) fn card_component(props: &CardProps) -> Html {
    let CardProps {
        card,
        locked,
        callback,
    } = props.clone();

    let mut class = card_classes(&card);
    if locked {
        class.push("locked");
    }

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("card {} clicked", card.cell.id());
        callback.emit(card.cell);
    });

    let icon_name = card.icon.asset_name();
    html! {
        <div {class} role="button" {onclick}>
            <div class="face front">
                <img src={BACK_IMAGE} alt="back-card"/>
            </div>
            <div class="face back">
                if card.revealed {
                    <img src={face_image(card.icon)} alt={icon_name}/>
                }
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(revealed: bool, in_scored_line: bool) -> game::CardView {
        game::CardView {
            cell: game::CellIndex::new(0).unwrap(),
            icon: game::IconKind::Pizza,
            revealed,
            in_scored_line,
        }
    }

    #[test]
    fn classes_follow_card_state() {
        let hidden = card_classes(&view(false, false));
        assert!(hidden.contains("card"));
        assert!(!hidden.contains("flipped"));

        let revealed = card_classes(&view(true, false));
        assert!(revealed.contains("flipped"));
        assert!(!revealed.contains("scored"));

        let scored = card_classes(&view(true, true));
        assert!(scored.contains("flipped"));
        assert!(scored.contains("scored"));
    }

    #[test]
    fn face_image_uses_asset_names() {
        assert_eq!(face_image(game::IconKind::Coin), "/image/bitcoin.png");
        assert_eq!(
            face_image(game::IconKind::Other(game::OtherIcon::Fruit)),
            "/image/fruit.png"
        );
    }
}
