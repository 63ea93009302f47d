//! Initial neighborhood data for a fresh install.
//!
//! Ids are generated at seed time, so cross-references (a post pointing at
//! its business) are wired up inside [`neighborhood`] rather than
//! hard-coded.

use chrono::{Duration, Utc};
use domains::{
    Alert, AlertKind, Business, BusinessCategory, BusinessStatus, Coordinates, DirectoryEntry,
    FeedAuthor, FeedPost, Message, Post, PostKind, ServiceKind, ServiceProvider,
};
use uuid::Uuid;

// Roughly a neighborhood in São Paulo.
const CENTER: Coordinates = Coordinates {
    latitude: -23.5505,
    longitude: -46.6333,
};

/// Everything a fresh session starts with.
pub struct SeedData {
    pub posts: Vec<Post>,
    pub alerts: Vec<Alert>,
    /// `(room, participant, message)` triples, oldest first.
    pub messages: Vec<(String, String, Message)>,
    pub directory: Vec<DirectoryEntry>,
    pub feed_posts: Vec<FeedPost>,
}

fn near(d_lat: f64, d_lng: f64) -> Option<Coordinates> {
    Some(Coordinates {
        latitude: CENTER.latitude + d_lat,
        longitude: CENTER.longitude + d_lng,
    })
}

pub fn neighborhood() -> SeedData {
    let now = Utc::now();

    let mercadinho = Business {
        id: Uuid::now_v7(),
        name: "Mercadinho Bom Dia".into(),
        category: BusinessCategory::Mercado,
        description: "Entregas gratuitas para compras acima de R$50 no bairro.".into(),
        address: "Rua das Flores, 12".into(),
        bairro: "Vila Mariana".into(),
        coordinates: near(0.0015, -0.0017),
        whatsapp: Some("+55 11 98888-0001".into()),
        opening_hours: Some("07:00–21:00".into()),
        delivery: true,
        status: BusinessStatus::Approved,
        created_at: now,
        updated_at: now,
    };
    let padaria = Business {
        id: Uuid::now_v7(),
        name: "Padaria do Zé".into(),
        category: BusinessCategory::Padaria,
        description: "Fermentação natural todos os dias desde 1987.".into(),
        address: "Av. Central, 401".into(),
        bairro: "Vila Mariana".into(),
        coordinates: near(-0.0015, 0.0013),
        whatsapp: Some("+55 11 98888-0002".into()),
        opening_hours: Some("06:00–20:00".into()),
        delivery: false,
        status: BusinessStatus::Approved,
        created_at: now,
        updated_at: now,
    };

    let eletricista = ServiceProvider {
        id: Uuid::now_v7(),
        name: "Carlos Ruiz".into(),
        service_kind: ServiceKind::Eletricista,
        description: "Instalação de tomadas, chuveiros e reparos. Orçamento grátis.".into(),
        whatsapp: Some("+55 11 97777-0001".into()),
        bairro: "Vila Mariana".into(),
        radius_km: Some(5.0),
        rating: Some(4.8),
        reviews_count: 23,
    };
    let professora = ServiceProvider {
        id: Uuid::now_v7(),
        name: "Ana Lima".into(),
        service_kind: ServiceKind::AulaParticular,
        description: "Aulas de inglês para crianças e adolescentes.".into(),
        whatsapp: Some("+55 11 97777-0002".into()),
        bairro: "Vila Mariana".into(),
        radius_km: Some(3.0),
        rating: Some(5.0),
        reviews_count: 11,
    };

    let posts = vec![
        Post {
            id: Uuid::now_v7(),
            title: "Eletricista Residencial".into(),
            desc: "Instalação de tomadas, chuveiros e reparos. Orçamento grátis.".into(),
            author: "Carlos Ruiz".into(),
            kind: PostKind::Autonomo,
            image: None,
            coordinates: near(-0.0005, -0.0007),
            business_id: None,
            service_provider_id: Some(eletricista.id),
            created_at: now,
        },
        Post {
            id: Uuid::now_v7(),
            title: "Pães Artesanais - 20% OFF".into(),
            desc: "Toda a linha de fermentação natural com desconto hoje.".into(),
            author: "Padaria do Zé".into(),
            kind: PostKind::Promocao,
            image: None,
            coordinates: near(-0.0015, 0.0013),
            business_id: Some(padaria.id),
            service_provider_id: None,
            created_at: now,
        },
        Post {
            id: Uuid::now_v7(),
            title: "Mercadinho da Esquina".into(),
            desc: "Entregas gratuitas para compras acima de R$50 no bairro.".into(),
            author: "Mercadinho Bom Dia".into(),
            kind: PostKind::Comercio,
            image: None,
            coordinates: near(0.0015, -0.0017),
            business_id: Some(mercadinho.id),
            service_provider_id: None,
            created_at: now,
        },
        Post {
            id: Uuid::now_v7(),
            title: "Aulas de Inglês".into(),
            desc: "Aulas particulares para crianças e adolescentes. Primeira aula grátis.".into(),
            author: "Ana Lima".into(),
            kind: PostKind::Autonomo,
            image: None,
            coordinates: near(0.0005, 0.0023),
            business_id: None,
            service_provider_id: Some(professora.id),
            created_at: now,
        },
        Post {
            id: Uuid::now_v7(),
            title: "Balconista de Padaria".into(),
            desc: "Vaga para período da manhã. Entregar currículo no local.".into(),
            author: "Padaria do Zé".into(),
            kind: PostKind::Vaga,
            image: None,
            coordinates: near(-0.0015, 0.0013),
            business_id: Some(padaria.id),
            service_provider_id: None,
            created_at: now,
        },
    ];

    let alerts = vec![
        Alert {
            id: Uuid::now_v7(),
            title: "Troca de Lâmpada".into(),
            desc: "Preciso de ajuda para trocar lâmpada do quintal. Sou idosa e não alcanço.".into(),
            author: "Dona Maria".into(),
            kind: AlertKind::Ajuda,
            image: None,
            created_at: now - Duration::hours(2),
        },
        Alert {
            id: Uuid::now_v7(),
            title: "Gato Desaparecido".into(),
            desc: "Gato siamês atende por 'Mingau'. Visto por último na Rua das Flores.".into(),
            author: "Julia S.".into(),
            kind: AlertKind::Pet,
            image: Some("https://images.unsplash.com/photo-1513245543132-31f507417b26".into()),
            created_at: now - Duration::days(1),
        },
        Alert {
            id: Uuid::now_v7(),
            title: "Movimentação Estranha".into(),
            desc: "Carro prata parado há muito tempo na esquina da padaria. Fiquem atentos.".into(),
            author: "Vigilância Comunitária".into(),
            kind: AlertKind::Seguranca,
            image: None,
            created_at: now,
        },
    ];

    let messages = vec![
        (
            "geral".to_string(),
            "Pedro M.".to_string(),
            Message {
                id: Uuid::now_v7(),
                text: "Bom dia pessoal! Alguém recomenda um encanador?".into(),
                author: "Pedro M.".into(),
                sent_at: now - Duration::minutes(10),
            },
        ),
        (
            "geral".to_string(),
            "Pedro M.".to_string(),
            Message {
                id: Uuid::now_v7(),
                text: "O Carlos é ótimo, o número dele está nos anúncios acima!".into(),
                author: "Mariana S.".into(),
                sent_at: now - Duration::minutes(8),
            },
        ),
    ];

    let feed_posts = vec![
        FeedPost {
            id: Uuid::now_v7(),
            content: "Acabei de conhecer a nova padaria do bairro. O pão de queijo é sensacional! 😋"
                .into(),
            author: FeedAuthor {
                id: "user-1".into(),
                name: "Maria Silva".into(),
                avatar_url: Some("https://i.pravatar.cc/150?u=user-1".into()),
            },
            image_urls: vec![
                "https://images.unsplash.com/photo-1549931319-a545dcf3bc73".into(),
            ],
            created_at: now - Duration::minutes(30),
            likes_count: 12,
            is_liked_by_viewer: false,
            comments_count: 3,
            is_author: false,
        },
        FeedPost {
            id: Uuid::now_v7(),
            content: "Alguém sabe se a feira vai acontecer amanhã mesmo com a previsão de chuva?"
                .into(),
            author: FeedAuthor {
                id: "user-2".into(),
                name: "João Souza".into(),
                avatar_url: Some("https://i.pravatar.cc/150?u=user-2".into()),
            },
            image_urls: Vec::new(),
            created_at: now - Duration::hours(5),
            likes_count: 5,
            is_liked_by_viewer: true,
            comments_count: 8,
            is_author: false,
        },
    ];

    SeedData {
        posts,
        alerts,
        messages,
        directory: vec![
            DirectoryEntry::Business(mercadinho),
            DirectoryEntry::Business(padaria),
            DirectoryEntry::ServiceProvider(eletricista),
            DirectoryEntry::ServiceProvider(professora),
        ],
        feed_posts,
    }
}

/// The session viewer used by the simulated feed.
pub fn viewer() -> FeedAuthor {
    FeedAuthor {
        id: "current-user".into(),
        name: "Você".into(),
        avatar_url: Some("https://i.pravatar.cc/150?u=current-user".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_links_posts_to_directory_entries() {
        let seed = neighborhood();
        let directory_ids: Vec<Uuid> = seed.directory.iter().map(|e| e.id()).collect();

        for post in &seed.posts {
            for linked in [post.business_id, post.service_provider_id]
                .into_iter()
                .flatten()
            {
                assert!(directory_ids.contains(&linked));
            }
        }
    }

    #[test]
    fn seed_ids_are_unique_per_collection() {
        let seed = neighborhood();
        let mut ids: Vec<Uuid> = seed.posts.iter().map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), seed.posts.len());
    }
}
