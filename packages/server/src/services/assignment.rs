use rand::Rng;

use crate::error::ValidationError;
use crate::models::{
    config::GameConfig,
    member::Member,
    role::Role,
    setup::ManualAssignments,
    team::{Team, TEAM_SIZE, TOTAL_MEMBERS},
};

/// Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

fn shuffled_roles<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Role> {
    let mut roles = Vec::with_capacity(TEAM_SIZE);
    roles.extend(std::iter::repeat(Role::Villager).take(config.villager_count));
    roles.extend(std::iter::repeat(Role::Werewolf).take(config.werewolf_count));
    shuffle(&mut roles, rng);
    roles
}

/// Randomly assigns roles and tasks to all ten members.
pub fn assign<R: Rng + ?Sized>(
    config: &GameConfig,
    rng: &mut R,
) -> Result<Vec<Member>, ValidationError> {
    config.validate()?;

    // 役職はチームごとに独立してシャッフル
    let roles_a = shuffled_roles(config, rng);
    let roles_b = shuffled_roles(config, rng);

    // タスクはチームを分けずに全体でシャッフル
    let mut large = config.large_task_pool.clone();
    let mut small = config.small_task_pool.clone();
    shuffle(&mut large, rng);
    shuffle(&mut small, rng);

    let per_large = config.large_tasks_per_member;
    let per_small = config.small_tasks_per_member;

    let mut members = Vec::with_capacity(TOTAL_MEMBERS);
    for (team, roles) in [(Team::A, roles_a), (Team::B, roles_b)] {
        for (name, role) in config.roster(team).iter().zip(roles) {
            // i 番目のメンバーは i 番目の区間を受け取るので重複しない
            let i = members.len();
            members.push(Member {
                name: name.clone(),
                team,
                role,
                large_tasks: large[i * per_large..(i + 1) * per_large].to_vec(),
                small_tasks: small[i * per_small..(i + 1) * per_small].to_vec(),
            });
        }
    }

    Ok(members)
}

// GM モード: 全員に役職とタスクが必要、名簿にない名前は不可
pub fn assign_manual(
    config: &GameConfig,
    manual: &ManualAssignments,
) -> Result<Vec<Member>, ValidationError> {
    config.validate_rosters()?;

    // 名簿にない名前（ソートしてエラーを決定的にする）
    let mut named: Vec<&String> = manual.roles.keys().chain(manual.tasks.keys()).collect();
    named.sort();
    if let Some(unknown) = named
        .into_iter()
        .find(|name| !config.members_in_order().any(|(_, member)| member == *name))
    {
        return Err(ValidationError::UnknownMember(unknown.clone()));
    }

    config
        .members_in_order()
        .map(|(team, name)| -> Result<Member, ValidationError> {
            let role = *manual
                .roles
                .get(name)
                .ok_or_else(|| ValidationError::MissingRole(name.clone()))?;
            let (large_tasks, small_tasks) = manual
                .tasks
                .get(name)
                .filter(|(large, small)| !large.is_empty() || !small.is_empty())
                .cloned()
                .ok_or_else(|| ValidationError::MissingTasks(name.clone()))?;
            Ok(Member {
                name: name.clone(),
                team,
                role,
                large_tasks,
                small_tasks,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::{Mode, TaskClass};
    use crate::utils::test_setup::{sample_config, sample_manual};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn count(members: &[Member], team: Team, role: Role) -> usize {
        members
            .iter()
            .filter(|m| m.team == team && m.role == role)
            .count()
    }

    #[test]
    fn scenario_three_villagers_two_werewolves() {
        let config = sample_config();
        let members = assign(&config, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(members.len(), 10);
        for team in Team::ALL {
            assert_eq!(count(&members, team, Role::Villager), 3);
            assert_eq!(count(&members, team, Role::Werewolf), 2);
        }

        let mut used = HashSet::new();
        for member in &members {
            assert_eq!(member.large_tasks.len(), 1);
            assert_eq!(member.small_tasks.len(), 1);
            for task in member.all_tasks() {
                assert!(used.insert(task.clone()), "{} handed out twice", task);
            }
        }
        assert_eq!(used.len(), 20);
    }

    #[test]
    fn members_follow_roster_order() {
        let config = sample_config();
        let members = assign(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let names: Vec<_> = members.iter().map(|m| m.name.clone()).collect();
        let expected: Vec<_> = config.team_a.iter().chain(&config.team_b).cloned().collect();
        assert_eq!(names, expected);
        assert!(members[..5].iter().all(|m| m.team == Team::A));
        assert!(members[5..].iter().all(|m| m.team == Team::B));
    }

    #[test]
    fn same_seed_gives_same_assignment() {
        let config = sample_config();
        let first = assign(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = assign(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn spare_tasks_are_left_unassigned() {
        let mut config = sample_config();
        config.large_task_pool.extend((10..25).map(|i| format!("large-{}", i)));
        config.large_tasks_per_member = 2;

        let members = assign(&config, &mut StdRng::seed_from_u64(3)).unwrap();
        let large: HashSet<_> = members.iter().flat_map(|m| m.large_tasks.clone()).collect();
        assert_eq!(large.len(), 20);
        assert!(large.iter().all(|t| config.large_task_pool.contains(t)));
    }

    #[test]
    fn all_werewolf_teams_are_allowed() {
        let config = GameConfig {
            villager_count: 0,
            werewolf_count: 5,
            ..sample_config()
        };
        let members = assign(&config, &mut StdRng::seed_from_u64(9)).unwrap();
        assert!(members.iter().all(|m| m.role == Role::Werewolf));
    }

    #[test]
    fn rejects_instead_of_under_assigning() {
        let mut config = sample_config();
        config.large_tasks_per_member = 2;
        assert_eq!(
            assign(&config, &mut StdRng::seed_from_u64(0)),
            Err(ValidationError::InsufficientTasks {
                class: TaskClass::Large,
                required: 20,
                available: 10
            })
        );
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut items: Vec<u32> = (0..50).collect();
        shuffle(&mut items, &mut StdRng::seed_from_u64(11));
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());

        let mut empty: Vec<u32> = vec![];
        shuffle(&mut empty, &mut StdRng::seed_from_u64(11));
        assert!(empty.is_empty());
    }

    #[test]
    fn manual_assignment_keeps_gm_choices() {
        let config = GameConfig {
            mode: Mode::Gm,
            ..sample_config()
        };
        let manual = sample_manual(&config);
        let members = assign_manual(&config, &manual).unwrap();

        assert_eq!(members.len(), 10);
        assert_eq!(members[0].role, Role::Werewolf);
        assert_eq!(members[0].large_tasks, ["gm task for A1"]);
        assert!(members[1..].iter().all(|m| m.role == Role::Villager));
    }

    #[test]
    fn manual_assignment_requires_role_for_everyone() {
        let config = sample_config();
        let mut manual = sample_manual(&config);
        manual.roles.remove("B4");
        assert_eq!(
            assign_manual(&config, &manual),
            Err(ValidationError::MissingRole("B4".to_string()))
        );
    }

    #[test]
    fn manual_assignment_requires_tasks_for_everyone() {
        let config = sample_config();
        let mut manual = sample_manual(&config);
        manual.tasks.insert("A2".to_string(), (vec![], vec![]));
        assert_eq!(
            assign_manual(&config, &manual),
            Err(ValidationError::MissingTasks("A2".to_string()))
        );
    }

    #[test]
    fn manual_assignment_rejects_unknown_names() {
        let config = sample_config();
        let mut manual = sample_manual(&config);
        manual.roles.insert("C1".to_string(), Role::Villager);
        assert_eq!(
            assign_manual(&config, &manual),
            Err(ValidationError::UnknownMember("C1".to_string()))
        );
    }
}
