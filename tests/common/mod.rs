//! Shared CSV fixture dataset for the integration tests: two campaigns,
//! three factions, a mixed land/naval roster, one ranged unit, and one
//! deliberately dangling shield reference.

use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

const FIXTURE_TABLES: [(&str, &str); 10] = [
    (
        "campaigns.csv",
        "campaign_id,onscreen_name,campaign_order\n\
         main_rome,Grand Campaign,2\n\
         gaul_invasion,Caesar in Gaul,1\n",
    ),
    (
        "factions.csv",
        "faction_id,text,campaign_id,military_group_id\n\
         rome,Rome,main_rome,roman\n\
         carthage,Carthage,main_rome,punic\n\
         gauls,Gallic Tribes,gaul_invasion,gallic\n",
    ),
    (
        "all_units.csv",
        "unit_id,land_unit_id,is_naval,upkeep_cost,recruitment_cost\n\
         hastati,lu_hastati,0,90,350\n\
         velites,lu_velites,0,60,250\n\
         trireme,lu_trireme,1,120,400\n\
         libyan_spearmen,lu_libyan,0,80,300\n\
         gallic_swordsmen,lu_gallic,0,70,280\n",
    ),
    (
        "land_units.csv",
        "land_unit_id,onscreen_name,category,melee_attack,melee_defence,charge_bonus,morale,bonus_hit_points,armour_id,shield_id,melee_weapon_id,range_weapon_id,accuracy,reload,ammo,recruitment_cost\n\
         lu_hastati,Hastati,melee infantry,35,20,12,45,10,mail,scutum,gladius,,0,0,0,999\n\
         lu_velites,Velites,missile infantry,15,10,6,35,5,linothorax,,spear,javelin_rw,5,10,7,250\n\
         lu_trireme,Roman Trireme,naval,20,15,8,40,0,,,gladius,,0,0,0,400\n\
         lu_libyan,Libyan Spearmen,melee infantry,22,24,9,40,8,linothorax,bronze_aspis,spear,,0,0,0,300\n\
         lu_gallic,Gallic Swordsmen,melee infantry,30,12,14,38,12,,gallic_shield,longsword,,0,0,0,280\n",
    ),
    (
        "melee_weapon.csv",
        "weapon_id,melee_weapon_type,damage,ap_damage,armour_piercing,shield_piercing,armour_penetrating,bonus_v_cavalry,bonus_v_elephants,bonus_v_infantry\n\
         gladius,sword,30,10,0,0,0,0,0,5\n\
         spear,spear,24,8,0,0,0,10,0,0\n\
         longsword,sword,34,6,0,0,0,0,0,0\n",
    ),
    (
        "range_weapon.csv",
        "weapon_id,projectile_id,precursor\n\
         javelin_rw,javelin_proj,1\n",
    ),
    (
        "projectile.csv",
        "projectile_id,damage,ap_damage,effective_range,base_reload_time,marksmanship_bonus\n\
         javelin_proj,20,12,80,10,0\n",
    ),
    (
        "armour.csv",
        "armour_id,armour_value,bonus_v_missiles,weak_v_missiles\n\
         mail,40,0,0\n\
         linothorax,25,1,0\n",
    ),
    (
        "shield.csv",
        "shield_id,shield_armour_value,shield_defence_value,missile_block_chance\n\
         scutum,35,25,50\n\
         gallic_shield,20,15,30\n",
    ),
    (
        "military_groups.csv",
        "military_group_id,unit_id\n\
         roman,hastati\n\
         roman,velites\n\
         roman,trireme\n\
         punic,libyan_spearmen\n\
         gallic,gallic_swordsmen\n",
    ),
];

/// Write the fixture tables into a fresh unique temp directory and return
/// its path. Callers clean up with `remove_fixture_dataset`.
pub fn write_fixture_dataset(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("unitscope-{name}-{stamp}"));
    fs::create_dir_all(&dir).expect("fixture dir should be created");

    for (file, contents) in FIXTURE_TABLES {
        fs::write(dir.join(file), contents).expect("fixture table should be written");
    }
    dir
}

pub fn remove_fixture_dataset(dir: &PathBuf) {
    let _ = fs::remove_dir_all(dir);
}
